use super::*;
use potforge_test::switch_task;

fn two_var_vars() -> FdrVars {
    FdrVars::from_domain_sizes(&[2, 3])
}

fn sample_heuristic() -> PotentialHeuristic {
    let mut heur = PotentialHeuristic::new();
    heur.add(PotentialFunction::new(vec![1.0, 0.0, -0.5, 2.0, 0.25]));
    heur.add(PotentialFunction::new(vec![0.0, 3.0, 0.0, 0.0, 0.0]));
    heur
}

#[test]
fn test_write_format() {
    let vars = FdrVars::from_domain_sizes(&[2]);
    let mut heur = PotentialHeuristic::new();
    heur.add(PotentialFunction::new(vec![1.0, -0.5]));

    let text = potentials_to_string(&vars, &heur).unwrap();
    let expected = "1\n\
                    begin_potentials\n\
                    0 0 1.00000000000000000000\n\
                    0 1 -0.50000000000000000000\n\
                    end_potentials\n";
    assert_eq!(text, expected);
}

#[test]
fn test_write_then_read() {
    let vars = two_var_vars();
    let heur = sample_heuristic();
    let text = potentials_to_string(&vars, &heur).unwrap();
    assert_eq!(text.lines().count(), 1 + 2 * (2 + 5));

    let parsed = read_potentials(&text, &vars).unwrap();
    assert_eq!(parsed, heur);
}

#[test]
fn test_empty_heuristic() {
    let vars = two_var_vars();
    let text = potentials_to_string(&vars, &PotentialHeuristic::new()).unwrap();
    assert_eq!(text, "0\n");
    assert!(read_potentials(&text, &vars).unwrap().is_empty());
}

#[test]
fn test_write_rejects_mismatched_function() {
    let vars = two_var_vars();
    let mut heur = PotentialHeuristic::new();
    heur.add(PotentialFunction::zeros(3));
    let mut out = Vec::new();
    assert!(matches!(
        write_potentials(&mut out, &vars, &heur),
        Err(PotForgeError::InvalidInput(_))
    ));
}

#[test]
fn test_read_accepts_any_fact_order() {
    let vars = FdrVars::from_domain_sizes(&[2]);
    let text = "1\nbegin_potentials\n0 1 2.5\n\n0 0 -1\nend_potentials\n";
    let heur = read_potentials(text, &vars).unwrap();
    assert_eq!(heur.functions()[0].weights(), &[-1.0, 2.5]);
}

#[test]
fn test_read_errors_carry_line_numbers() {
    let vars = FdrVars::from_domain_sizes(&[2]);
    let cases = [
        ("", 1),
        ("x\n", 1),
        ("1\nbegin\n", 2),
        ("1\nbegin_potentials\n0 0 1.0\n", 4),
        ("1\nbegin_potentials\n0 0 1.0\n0 2 1.0\nend_potentials\n", 4),
        ("1\nbegin_potentials\n0 0 1.0\n0 0 2.0\nend_potentials\n", 4),
        ("1\nbegin_potentials\n0 0 abc\n0 1 0\nend_potentials\n", 3),
        ("1\nbegin_potentials\n0 0 1 7\n0 1 0\nend_potentials\n", 3),
        ("1\nbegin_potentials\n0 0 1.0\nend_potentials\n", 4),
        ("1\nbegin_potentials\n0 0 1\n0 1 0\nend_potentials\nextra\n", 6),
    ];
    for (text, expected_line) in cases {
        match read_potentials(text, &vars) {
            Err(PotForgeError::Parse { line, .. }) => {
                assert_eq!(line, expected_line, "input {:?}", text)
            }
            other => panic!("expected parse error for {:?}, got {:?}", text, other),
        }
    }
}

#[test]
fn test_generated_heuristic_survives_artifact() {
    let task = switch_task();
    let heur = crate::generate_heuristic(&task, &Default::default()).unwrap();
    let text = potentials_to_string(&task.vars, &heur).unwrap();
    let parsed = read_potentials(&text, &task.vars).unwrap();
    assert_eq!(
        parsed.estimate_fdr_state(&task.vars, &task.init),
        heur.estimate_fdr_state(&task.vars, &task.init)
    );
}
