use crate::output::{print_json, print_table};
use pathwise_core::resolver::Resolver;

pub fn run(json: bool) -> anyhow::Result<()> {
    let rules = Resolver::default().describe();
    if json {
        return print_json(&rules);
    }

    let rows = rules
        .iter()
        .map(|r| {
            vec![
                r.priority.to_string(),
                r.id.to_string(),
                r.decision.to_string(),
                r.when.to_string(),
            ]
        })
        .collect();
    print_table(&["#", "RULE", "DECISION", "WHEN"], rows);
    Ok(())
}
