use rstest::rstest;

use usage::{Argument, ArgumentType, Dialect, Evaluation, Registry};

/// A sort-style program declaration exercising every argument flavor:
/// a `many` positional, defaulted strings, required strings, a simple flag,
/// one requirement edge, and one conflict edge.
fn sort_program(dialect: Dialect) -> Registry {
    let mut registry = Registry::with_dialect("program.exe", dialect);
    registry.set_description("Sort files based on the specified keys.");

    registry
        .add(
            Argument::positional("file")
                .help("File(s) to compute.")
                .required(true)
                .unwrap()
                .many(true)
                .unwrap(),
        )
        .unwrap();
    registry
        .add(
            Argument::named("extension")
                .help("Extension of the output file.")
                .shortcut('o')
                .unwrap()
                .typed(ArgumentType::String)
                .unwrap()
                .default_value("sor.txt")
                .unwrap(),
        )
        .unwrap();
    registry
        .add(
            Argument::named("field_separator")
                .help("Field separator.")
                .shortcut('s')
                .unwrap()
                .typed(ArgumentType::String)
                .unwrap()
                .default_value("\t")
                .unwrap(),
        )
        .unwrap();
    registry
        .add(
            Argument::named("decimal_separator")
                .help("Decimal separator.")
                .shortcut('n')
                .unwrap()
                .typed(ArgumentType::String)
                .unwrap()
                .default_value(".")
                .unwrap(),
        )
        .unwrap();
    registry
        .add(
            Argument::named("date_format")
                .help("Date format (use d for days, m for months and y for years).")
                .shortcut('d')
                .unwrap()
                .typed(ArgumentType::String)
                .unwrap()
                .default_value("d.m.y")
                .unwrap(),
        )
        .unwrap();
    registry
        .add(
            Argument::named("position")
                .help("Number(s) of the field(s) to sort, separated by comma ','.")
                .shortcut('p')
                .unwrap()
                .typed(ArgumentType::String)
                .unwrap()
                .required(true)
                .unwrap(),
        )
        .unwrap();
    registry
        .add(
            Argument::named("fixed")
                .help("Position(s) in chars and length(s) of the field(s) to sort.")
                .shortcut('f')
                .unwrap()
                .typed(ArgumentType::String)
                .unwrap()
                .required(true)
                .unwrap(),
        )
        .unwrap();
    registry
        .add(
            Argument::named("reverse")
                .help("Apply a descending sort instead of ascending sort.")
                .shortcut('r')
                .unwrap(),
        )
        .unwrap();
    registry
        .add(
            Argument::named("begin")
                .help("Number of the starting row of the sort.")
                .shortcut('b')
                .unwrap()
                .typed(ArgumentType::String)
                .unwrap()
                .default_value("1")
                .unwrap(),
        )
        .unwrap();

    registry.add_requirement("field_separator", "position").unwrap();
    registry.add_conflict("position", "fixed").unwrap();
    registry
}

fn failure_message(evaluation: Evaluation) -> String {
    match evaluation {
        Evaluation::Failure(error) => error.to_string(),
        other => panic!("expected a failure, found {other:?}"),
    }
}

#[rstest]
#[case::nothing_passed(
    &["program.exe"],
    "Missing required argument 'file' - see program.exe /? for help."
)]
#[case::position_missing(
    &["program.exe", "files*.txt"],
    "Missing required argument 'position' - see program.exe /? for help."
)]
#[case::position_missing_despite_dependent(
    &["program.exe", "files*.txt", "/s:\",\"", "/f:3,7"],
    "Missing required argument 'position' - see program.exe /? for help."
)]
#[case::simple_passed_as_string(
    &["program.exe", "files*.txt", "/r:2", "/f:3,7"],
    "Argument 'reverse' passed as 'string' while expected type is 'simple' - see program.exe /? for help."
)]
#[case::unknown_switch(
    &["program.exe", "files*.txt", "/z", "/f:3,7"],
    "Unknown argument '/z' - see program.exe /? for help."
)]
#[case::conflicting_pair(
    &["program.exe", "files*.txt", "/p:2", "/f:3,7"],
    "Arguments 'position' and 'fixed' can't be used together - see program.exe /? for help."
)]
fn evaluate_failures(#[case] argv: &[&str], #[case] expected: &str) {
    // Setup
    let mut registry = sort_program(Dialect::windows());

    // Execute
    let evaluation = registry.evaluate(argv);

    // Verify
    assert_eq!(failure_message(evaluation), expected);
}

#[test]
fn evaluate_malformed_boolean_token() {
    // Setup
    let mut registry = sort_program(Dialect::windows());
    registry
        .add(
            Argument::named("z")
                .typed(ArgumentType::Boolean)
                .unwrap(),
        )
        .unwrap();

    // Execute
    let evaluation = registry.evaluate(&["program.exe", "files*.txt", "/z+\"2\"", "/f:3,7"]);

    // Verify
    assert_eq!(
        failure_message(evaluation),
        "Error found in command line argument number 2: '/z+\"2\"' - see program.exe /? for help."
    );
}

#[test]
fn evaluate_help_flag() {
    // Setup
    let mut registry = sort_program(Dialect::windows());

    // Execute & verify: help short-circuits, even ahead of required checks.
    assert_eq!(registry.evaluate(&["program.exe", "/?"]), Evaluation::Help);
}

#[test]
fn evaluate_success_with_defaults_and_excused_required() {
    // Setup
    let mut registry = sort_program(Dialect::windows());

    // Execute
    let evaluation =
        registry.evaluate(&["program.exe", "files*.txt", "/f:3,7", "/r", "/n:\",\""]);

    // Verify
    assert_eq!(evaluation, Evaluation::Success);
    assert_eq!(registry.values("file").unwrap(), ["files*.txt"]);
    assert_eq!(registry.values("fixed").unwrap(), ["3,7"]);
    assert_eq!(registry.values("reverse").unwrap(), ["true"]);
    // The quote detaches the remainder verbatim, trailing quote included.
    assert_eq!(registry.values("decimal_separator").unwrap(), [",\""]);
    // Defaults with no pending requirement apply.
    assert_eq!(registry.values("extension").unwrap(), ["sor.txt"]);
    assert_eq!(registry.values("date_format").unwrap(), ["d.m.y"]);
    assert_eq!(registry.values("begin").unwrap(), ["1"]);
    // field_separator requires position, which was never assigned, so its
    // default stays off.
    assert!(registry.values("field_separator").unwrap().is_empty());
    // position is required but excused by its assigned conflict partner.
    assert!(registry.values("position").unwrap().is_empty());
}

#[test]
fn evaluate_unix_dialect() {
    // Setup
    let mut registry = sort_program(Dialect::unix());

    // Execute
    let evaluation = registry.evaluate(&["sort", "data.txt", "-p:2", "-r"]);

    // Verify
    assert_eq!(evaluation, Evaluation::Success);
    assert_eq!(registry.values("position").unwrap(), ["2"]);
    assert_eq!(registry.values("reverse").unwrap(), ["true"]);

    // And the default help flag is "h".
    let mut second = sort_program(Dialect::unix());
    assert_eq!(second.evaluate(&["sort", "-h"]), Evaluation::Help);
}

#[test]
fn evaluate_unix_dialect_failure_suffix() {
    // Setup
    let mut registry = sort_program(Dialect::unix());

    // Execute
    let evaluation = registry.evaluate(&["sort", "data.txt", "-x", "-p:2"]);

    // Verify
    assert_eq!(
        failure_message(evaluation),
        "Unknown argument '-x' - see program.exe -h for help."
    );
}

#[test]
fn evaluate_many_positional_absorbs_consecutive_tokens() {
    // Setup
    let mut registry = sort_program(Dialect::windows());

    // Execute
    let evaluation =
        registry.evaluate(&["program.exe", "a.txt", "b.txt", "c.txt", "/p:2"]);

    // Verify
    assert_eq!(evaluation, Evaluation::Success);
    assert_eq!(
        registry.values("file").unwrap(),
        ["a.txt", "b.txt", "c.txt"]
    );
}

#[test]
fn evaluate_boolean_token_values() {
    // Setup
    let mut registry = Registry::new("tool");
    registry
        .add(Argument::positional("input").required(true).unwrap())
        .unwrap();
    registry
        .add(
            Argument::named("color")
                .shortcut('c')
                .unwrap()
                .typed(ArgumentType::Boolean)
                .unwrap(),
        )
        .unwrap();
    registry
        .add(Argument::named("wrap").typed(ArgumentType::Boolean).unwrap())
        .unwrap();

    // Execute
    let evaluation = registry.evaluate(&["tool", "in.txt", "-c+", "-wrap-"]);

    // Verify
    assert_eq!(evaluation, Evaluation::Success);
    assert_eq!(registry.values("color").unwrap(), ["true"]);
    assert_eq!(registry.values("wrap").unwrap(), ["false"]);
}

#[test]
fn evaluate_transitive_requirement() {
    // Setup: begin -> extension -> chunk, where chunk has no default.
    let mut registry = sort_program(Dialect::windows());
    registry
        .add(Argument::named("chunk").typed(ArgumentType::String).unwrap())
        .unwrap();
    registry.add_requirement("begin", "extension").unwrap();
    registry.add_requirement("extension", "chunk").unwrap();

    // Execute: begin and extension assigned explicitly, chunk never passed.
    let evaluation = registry.evaluate(&[
        "program.exe",
        "files*.txt",
        "/p:2",
        "/b:5",
        "/o:out.txt",
    ]);

    // Verify: the requirement chain bottoms out at the unassigned chunk.
    assert_eq!(
        failure_message(evaluation),
        "Missing required argument 'chunk' - see program.exe /? for help."
    );
}

#[test]
fn evaluate_cascaded_conflict() {
    // Setup: position <-> fixed declared, fixed <-> alternate declared;
    // position and alternate conflict through the group.
    let mut registry = sort_program(Dialect::windows());
    registry
        .add(
            Argument::named("alternate")
                .typed(ArgumentType::String)
                .unwrap()
                .required(true)
                .unwrap(),
        )
        .unwrap();
    registry.add_conflict("fixed", "alternate").unwrap();

    // Execute
    let evaluation =
        registry.evaluate(&["program.exe", "files*.txt", "/p:2", "/alternate:x"]);

    // Verify
    assert_eq!(
        failure_message(evaluation),
        "Arguments 'position' and 'alternate' can't be used together - see program.exe /? for help."
    );
}

#[test]
fn removal_cascades_into_relations() {
    // Setup
    let mut registry = sort_program(Dialect::windows());

    // Execute
    let removed = registry.remove("position").unwrap();

    // Verify: both edges touching 'position' went with it.
    assert_eq!(removed.name(), "position");
    assert!(registry.requirement_pairs().is_empty());
    assert!(registry.conflict_pairs().is_empty());

    // With the conflict gone, 'fixed' alone satisfies the required scan.
    let evaluation = registry.evaluate(&["program.exe", "files*.txt", "/f:3,7"]);
    assert_eq!(evaluation, Evaluation::Success);
}
