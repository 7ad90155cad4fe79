//! `crafter demo` -- scripted walk-through of plan editing and execution.
//!
//! Three plans (plain, executable, empty) go through the same add, remove
//! and replace sequence. The executable plan is then queried and applied,
//! and edits to steps that already ran are shown to fail.

use std::fmt;

use anyhow::Result;
use crafter_core::{CraftError, ExecutablePlan, Formula, Plan};
use serde_json::Value;

use crate::context::{FormulaSettings, RuntimeContext};
use crate::output::output_json;

const BAKERY: &[&str] = &[
    "2 butter, 10 milk -> 36 cookies",
    "1 sugar -> 50 candy",
    "2 apple, 10 sugar, 30 butter, 5 water -> 10 apple pie",
];

const KITCHEN: &[&str] = &[
    "10 flour, 2 yeast, 1 sugar -> 12 bread",
    "5 chocolate -> 24 cake",
    "2 butter, 10 milk -> 36 cookies",
    "1 sugar -> 50 candy",
    "2 apple, 10 sugar, 30 butter, 5 water -> 10 apple pie",
];

const PANCAKES: &str = "2 milk -> 6 pancakes";
const BROWNIE: &str = "3 chocolate, 2 sugar -> 20 brownie";
const CANDY: &str = "1 sugar -> 50 candy";

/// Execute the `crafter demo` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let settings = ctx.formula_settings()?;
    let mut transcript = Transcript::new(ctx.json);

    let subjects = [
        Subject::Plain("bakery plan", Plan::from_formulas(&build(&settings, BAKERY)?)),
        Subject::Executable(
            "kitchen executable plan",
            ExecutablePlan::new(&build(&settings, KITCHEN)?),
        ),
        Subject::Plain("empty plan", Plan::new()),
    ];

    let pancakes = settings.parse(PANCAKES, 0)?;
    let brownie = settings.parse(BROWNIE, 1)?;
    let candy = settings.parse(CANDY, 2)?;

    for mut subject in subjects {
        let label = subject.label();

        transcript.section(format!("Formula(s) in {label}"));
        transcript.show(&subject);

        transcript.section(format!("Add new formula to {label}"));
        let added = subject.add(&pancakes);
        transcript.outcome("add", added, &subject);

        transcript.section(format!("Remove last formula from {label}"));
        let removed = subject.remove();
        transcript.outcome("remove", removed, &subject);

        transcript.section(format!("Replace second formula in {label}"));
        let replaced = subject.replace(1, &brownie);
        transcript.outcome("replace", replaced, &subject);

        match subject {
            Subject::Executable(_, ref mut plan) => execute(&mut transcript, plan, &candy),
            Subject::Plain(..) => {
                transcript.note(format!("(skip) {label} cannot be queried or applied"));
            }
        }
        transcript.blank();
    }

    transcript.finish();
    Ok(())
}

fn build(settings: &FormulaSettings, recipes: &[&str]) -> Result<Vec<Formula>> {
    recipes
        .iter()
        .enumerate()
        .map(|(i, recipe)| settings.parse(recipe, i))
        .collect()
}

fn execute(transcript: &mut Transcript, plan: &mut ExecutablePlan, candy: &Formula) {
    transcript.section("Query and apply".to_string());
    transcript.record("query", plan.query());
    transcript.record("apply", plan.apply());
    transcript.record("query", plan.query());

    transcript.section("Try replacing a completed step".to_string());
    transcript.record("apply", plan.apply());
    transcript.record("replace", plan.replace(0, candy).map(|()| plan.to_string()));

    transcript.section("Try removing a completed last step".to_string());
    while !plan.is_finished() {
        transcript.record("apply", plan.apply());
    }
    transcript.record("remove", plan.remove().map(|()| plan.to_string()));
}

/// A plan under demonstration, with the label it is printed under.
enum Subject {
    Plain(&'static str, Plan),
    Executable(&'static str, ExecutablePlan),
}

impl Subject {
    fn label(&self) -> &'static str {
        match self {
            Self::Plain(label, _) | Self::Executable(label, _) => *label,
        }
    }

    fn add(&mut self, formula: &Formula) -> crafter_core::Result<()> {
        match self {
            Self::Plain(_, plan) => plan.add(formula),
            Self::Executable(_, plan) => plan.add(formula),
        }
    }

    fn remove(&mut self) -> crafter_core::Result<()> {
        match self {
            Self::Plain(_, plan) => plan.remove(),
            Self::Executable(_, plan) => plan.remove(),
        }
    }

    fn replace(&mut self, index: usize, formula: &Formula) -> crafter_core::Result<()> {
        match self {
            Self::Plain(_, plan) => plan.replace(index, formula),
            Self::Executable(_, plan) => plan.replace(index, formula),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(_, plan) => fmt::Display::fmt(plan, f),
            Self::Executable(_, plan) => fmt::Display::fmt(plan, f),
        }
    }
}

/// Collects demo output as text lines or, in JSON mode, as events printed
/// at the end.
struct Transcript {
    json: bool,
    section: String,
    events: Vec<Value>,
}

impl Transcript {
    fn new(json: bool) -> Self {
        Self {
            json,
            section: String::new(),
            events: Vec::new(),
        }
    }

    fn section(&mut self, title: String) {
        if !self.json {
            println!("*********** {title} ***********");
        }
        self.section = title;
    }

    fn show(&mut self, plan: &Subject) {
        self.push("show", Ok(plan.to_string()));
    }

    fn outcome(&mut self, operation: &str, result: crafter_core::Result<()>, plan: &Subject) {
        self.push(operation, result.map(|()| plan.to_string()));
    }

    fn record<T: fmt::Display>(&mut self, operation: &str, result: crafter_core::Result<T>) {
        self.push(operation, result.map(|value| value.to_string()));
    }

    fn note(&mut self, text: String) {
        self.push("note", Ok(text));
    }

    fn blank(&mut self) {
        if !self.json {
            println!();
        }
    }

    fn push(&mut self, operation: &str, result: std::result::Result<String, CraftError>) {
        if self.json {
            let event = match result {
                Ok(output) => serde_json::json!({
                    "section": self.section,
                    "operation": operation,
                    "output": output,
                }),
                Err(e) => serde_json::json!({
                    "section": self.section,
                    "operation": operation,
                    "error": e.to_string(),
                    "kind": e.kind().as_str(),
                }),
            };
            self.events.push(event);
            return;
        }
        match result {
            Ok(output) => println!("{}", output.trim_end()),
            Err(e) => println!("Error: {e}"),
        }
    }

    fn finish(self) {
        if self.json {
            output_json(&self.events);
        }
    }
}
