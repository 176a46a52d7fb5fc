use flags::{DefinitionError, Enumeration};

#[test]
fn message_vocabulary_matches_the_documented_scenario() {
    let messages =
        Enumeration::new(["OPEN", "UPDATE", "NOTIFICATION"]).expect("definition is valid");

    assert_eq!(messages["OPEN"], 1u64);
    assert_eq!(messages["UPDATE"], 2u64);
    assert_eq!(messages["NOTIFICATION"], 4u64);

    assert_eq!(messages["OPEN"].to_string(), "OPEN");
    assert_eq!(messages["UPDATE"].to_string(), "UPDATE");
    assert_eq!(messages["NOTIFICATION"].to_string(), "NOTIFICATION");

    assert_eq!(&messages["OPEN"] | &messages["UPDATE"], 3);
}

#[test]
fn flags_interoperate_with_raw_masks() {
    let messages =
        Enumeration::new(["OPEN", "UPDATE", "NOTIFICATION"]).expect("definition is valid");
    let wire_mask: u64 = 0b110;

    assert_eq!(&messages["UPDATE"] & wire_mask, 2);
    assert_eq!(wire_mask | &messages["OPEN"], 0b111);
    assert!(messages["NOTIFICATION"].is_set_in(wire_mask));
    assert!(!messages["OPEN"].is_set_in(wire_mask));
}

#[test]
fn repeated_lookups_return_identical_bindings() {
    let messages = Enumeration::new(["OPEN", "UPDATE"]).expect("definition is valid");

    let first = messages.flag("OPEN").expect("defined");
    let second = messages.flag("OPEN").expect("defined");

    assert_eq!(first, second);
    assert_eq!(first.bits(), second.bits());
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn undefined_names_surface_as_errors() {
    let messages = Enumeration::new(["OPEN", "UPDATE"]).expect("definition is valid");

    let err = messages.flag("KEEPALIVE").expect_err("undefined name");
    assert_eq!(err.name(), "KEEPALIVE");
    assert_eq!(err.to_string(), "unknown flag name \"KEEPALIVE\"");
}

#[test]
fn oversized_definitions_are_rejected() {
    let names: Vec<String> = (0..65).map(|i| format!("FLAG_{i}")).collect();

    let err = Enumeration::new(&names).expect_err("65 flags cannot fit in 64 bits");
    assert!(matches!(
        err,
        DefinitionError::FlagOverflow {
            requested: 65,
            capacity: 64,
        }
    ));
}

#[test]
fn duplicate_definitions_are_rejected() {
    let err =
        Enumeration::new(["OPEN", "UPDATE", "OPEN"]).expect_err("duplicate names must not bind");
    assert_eq!(err.duplicate_name(), Some("OPEN"));
}

#[test]
fn constructed_sets_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    let messages =
        Enumeration::new(["OPEN", "UPDATE", "NOTIFICATION"]).expect("definition is valid");
    assert_send_sync(&messages);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(messages["OPEN"].to_string(), "OPEN");
                assert_eq!(&messages["OPEN"] | &messages["NOTIFICATION"], 5);
            });
        }
    });
}

#[test]
fn cloned_flags_outlive_the_set_they_came_from() {
    let open = {
        let messages = Enumeration::new(["OPEN", "UPDATE"]).expect("definition is valid");
        messages["OPEN"].clone()
    };

    assert_eq!(open.bits(), 1);
    assert_eq!(open.to_string(), "OPEN");
}
