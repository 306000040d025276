//! Runs all four inference engines on the classic burglary/alarm network and prints the
//! posterior of `Burglary` given that both neighbors called.

use pearl::{
    enumeration_ask, prior_sample, rejection_sampling, variable_elimination_ask, Assignment,
    BayesNetBuilder, Initialization, Result, Variable,
};

use ndarray::array;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<()> {
    env_logger::init();

    let burglary = Variable::binary("Burglary");
    let earthquake = Variable::binary("Earthquake");
    let alarm = Variable::binary("Alarm");
    let john = Variable::binary("JohnCalls");
    let mary = Variable::binary("MaryCalls");

    let model = BayesNetBuilder::new()
        .with_variable(&burglary, &[], Initialization::Binomial(0.001))
        .with_variable(&earthquake, &[], Initialization::Binomial(0.002))
        .with_variable(
            &alarm,
            &[&burglary, &earthquake],
            Initialization::Table(
                array![[[0.999, 0.001], [0.71, 0.29]], [[0.06, 0.94], [0.05, 0.95]]].into_dyn(),
            ),
        )
        .with_variable(
            &john,
            &[&alarm],
            Initialization::Table(array![[0.95, 0.05], [0.1, 0.9]].into_dyn()),
        )
        .with_variable(
            &mary,
            &[&alarm],
            Initialization::Table(array![[0.99, 0.01], [0.3, 0.7]].into_dyn()),
        )
        .build()?;

    let mut evidence = Assignment::new();
    evidence.observe(&john, "true")?;
    evidence.observe(&mary, "true")?;

    let exact = enumeration_ask(&burglary, &evidence, &model)?;
    println!("enumeration:          P(Burglary | john, mary) = {:?}", exact.probabilities());

    let ve = variable_elimination_ask(&burglary, &evidence, &model)?;
    println!("variable elimination: P(Burglary | john, mary) = {:?}", ve.probabilities());

    let mut rng = StdRng::seed_from_u64(2025);

    let sample = prior_sample(&model, &mut rng)?;
    println!("one prior sample:");
    for (var, value) in sample.iter() {
        println!("  {} = {}", var.name(), var.label(value));
    }

    // both neighbors calling is rare, so most samples are rejected; a large n keeps the
    // estimate usable
    let estimate = rejection_sampling(&burglary, &evidence, &model, 200_000, &mut rng)?;
    println!(
        "rejection sampling:   P(Burglary | john, mary) ~ {:?}",
        estimate.probabilities()
    );

    Ok(())
}
