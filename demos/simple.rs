use rodchain::RodCalculator;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Two steel rods, anchored on the left, pulled at the free end
    let mut calculator = RodCalculator::new(3);
    calculator.set_rod(1, 1.0, 0.01, 200.0e9, 0.0, 250.0e6)?;
    calculator.set_rod(2, 0.5, 0.005, 200.0e9, 0.0, 250.0e6)?;
    calculator.set_force(3, 1_000.0)?;

    let solution = calculator.calculate(true, false)?;

    for (node, displacement) in solution.displacements.iter().enumerate() {
        println!("u{} = {displacement:.3e} m", node + 1);
    }

    Ok(())
}
