use crate::output::{print_json, print_table};
use blueprint_core::actions::identifier::registered_actions;
use blueprint_core::actions::ActionKind;

pub fn run(json: bool) -> anyhow::Result<()> {
    let entries = registered_actions();

    if json {
        let value: Vec<_> = entries
            .iter()
            .map(|e| {
                serde_json::json!({
                    "canonical": e.canonical,
                    "aliases": e.aliases,
                    "kind": ActionKind::from_identifier(e.canonical),
                    "default": e.default,
                    "prod": e.prod,
                })
            })
            .collect();
        return print_json(&value);
    }

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.canonical.to_string(),
                e.aliases.join(", "),
                e.default.to_string(),
                e.prod.to_string(),
            ]
        })
        .collect();
    print_table(&["IDENTIFIER", "ALIASES", "DEFAULT", "PROD"], &rows);
    Ok(())
}
