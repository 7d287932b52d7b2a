use crate::output::print_json;
use blueprint_core::actions::identifier::{lookup, resolve};
use blueprint_core::actions::ActionKind;

pub fn run(identifier: &str, tier: &str, json: bool) -> anyhow::Result<()> {
    let resolved = resolve(identifier, tier);

    if json {
        print_json(&serde_json::json!({
            "identifier": identifier,
            "tier": tier,
            "resolved": resolved,
            "registered": lookup(identifier).is_some(),
            "kind": ActionKind::from_identifier(identifier),
        }))?;
    } else {
        println!("{resolved}");
    }
    Ok(())
}
