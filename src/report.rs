use rodchain::{NodeStatus, RodCalculator, Solution};
use std::fmt::Write;

/// Label printed for a node status.
fn status_label(status: Option<NodeStatus>) -> &'static str {
    match status {
        Some(NodeStatus::Anchored) => "anchored",
        Some(NodeStatus::Stationary) => "stationary",
        Some(NodeStatus::Free) => "free",
        None => "-",
    }
}

/// Render a textual summary of a rod chain analysis.
///
/// Displacements and stresses use scientific notation so that values from
/// steel rods in metres and pascals stay readable.
#[must_use]
pub fn render_report(calculator: &RodCalculator, solution: &Solution) -> String {
    let mut output = String::new();

    // State the problem first so the tables below have context.
    let anchors = match (solution.left_anchor, solution.right_anchor) {
        (true, true) => "both ends",
        (true, false) => "left end",
        (false, true) => "right end",
        (false, false) => "none",
    };
    writeln!(
        &mut output,
        "Rod chain analysis: {} rods, {} nodes, anchored at {anchors}",
        solution.rod_count(),
        solution.node_count()
    )
    .expect("writing to string cannot fail");

    // Node positions are cumulative rod lengths; displacements come straight
    // from the solved stiffness system.
    output.push_str("\nNodes\n");
    writeln!(
        &mut output,
        "{:>5} {:>12} {:>14} {:>11}",
        "node", "x [m]", "u [m]", "status"
    )
    .expect("writing to string cannot fail");
    let coordinates = calculator.node_coordinates();
    let tolerance = calculator.settings().stationary_tolerance;
    for (node, displacement) in solution.displacements.iter().enumerate() {
        let x = coordinates.get(node).copied().unwrap_or(f64::NAN);
        writeln!(
            &mut output,
            "{:>5} {:>12.3} {:>+14.6e} {:>11}",
            node + 1,
            x,
            displacement,
            status_label(solution.node_status(node, tolerance))
        )
        .expect("writing to string cannot fail");
    }

    // Internal force and the stress it produces in each rod, sigma = N / A
    // (https://en.wikipedia.org/wiki/Stress_(mechanics)).
    output.push_str("\nRods\n");
    writeln!(
        &mut output,
        "{:>5} {:>14} {:>14}",
        "rod", "N [N]", "sigma [Pa]"
    )
    .expect("writing to string cannot fail");
    for (index, force) in solution.rod_forces.iter().enumerate() {
        let stress = calculator
            .rod(index)
            .map_or(f64::NAN, |rod| rod.stress(*force));
        writeln!(
            &mut output,
            "{:>5} {:>+14.6e} {:>+14.6e}",
            index + 1,
            force,
            stress
        )
        .expect("writing to string cannot fail");
    }

    // Reactions are only meaningful at the supports.
    output.push_str("\nReactions\n");
    for (node, reaction) in solution.reactions.iter().enumerate() {
        if solution.is_anchored(node) {
            writeln!(&mut output, "  node {}: R = {:+.6e} N", node + 1, reaction)
                .expect("writing to string cannot fail");
        }
    }

    // Compare nodal stress magnitudes with the allowable stress so the reader
    // gets a go/no-go verdict regardless of the sign convention.
    output.push_str("\nStresses\n");
    writeln!(
        &mut output,
        "{:>5} {:>14} {:>14} {:>9}",
        "node", "|sigma| [Pa]", "allow [Pa]", "check"
    )
    .expect("writing to string cannot fail");
    for (node, check) in calculator.stress_checks(solution).iter().enumerate() {
        let verdict = if check.is_within_limit() {
            "OK"
        } else {
            "EXCEEDED"
        };
        writeln!(
            &mut output,
            "{:>5} {:>14.6e} {:>14.6e} {:>9}",
            node + 1,
            check.stress,
            check.allowable,
            verdict
        )
        .expect("writing to string cannot fail");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_human_readable_report() {
        let mut calculator = RodCalculator::new(3);
        calculator
            .set_rod(1, 1.0, 0.5, 2.0, 0.0, 100.0)
            .expect("rod exists");
        calculator
            .set_rod(2, 1.0, 1.0, 1.0, 0.0, 4.0)
            .expect("rod exists");
        calculator.set_force(2, 10.0).expect("node exists");
        let solution = calculator.calculate(true, false).expect("analysis succeeds");

        let report = render_report(&calculator, &solution);

        assert!(report.contains("2 rods, 3 nodes, anchored at left end"));
        assert!(report.contains("anchored"));
        assert!(report.contains("sigma [Pa]"));
        // Rod 1 carries 10 N over half a square metre.
        assert!(report.contains("    1    +1.000000e1    +2.000000e1"));
        assert!(report.contains("    2    +0.000000e0    +0.000000e0"));
        assert!(report.contains("node 1: R = -1.000000e1 N"));
        assert!(report.contains("EXCEEDED"));
    }

    #[test]
    fn labels_every_status() {
        assert_eq!(status_label(Some(NodeStatus::Anchored)), "anchored");
        assert_eq!(status_label(Some(NodeStatus::Stationary)), "stationary");
        assert_eq!(status_label(Some(NodeStatus::Free)), "free");
        assert_eq!(status_label(None), "-");
    }
}
