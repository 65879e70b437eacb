use rodchain::{RodSystem, Rod};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A rod clamped at both ends under its own distributed load, plus a point load
    let system = RodSystem {
        left_anchor: true,
        right_anchor: true,
        rods: vec![
            Rod::new(2.0, 0.002, 210.0e9, 5.0e4, 160.0e6),
            Rod::new(1.0, 0.001, 210.0e9, 0.0, 160.0e6),
        ],
        node_forces: vec![0.0, -2.0e5, 0.0],
        ..RodSystem::default()
    };

    let calculator = system.calculator()?;
    let solution = calculator.calculate(system.left_anchor, system.right_anchor)?;

    for (node, check) in calculator.stress_checks(&solution).iter().enumerate() {
        let verdict = if check.is_within_limit() { "ok" } else { "exceeded" };
        println!(
            "node {}: |sigma| = {:.3e} Pa, factor of safety {:.2} ({verdict})",
            node + 1,
            check.stress,
            check.factor_of_safety()
        );
    }

    Ok(())
}
