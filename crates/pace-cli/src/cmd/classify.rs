use crate::output::{print_classification, print_json, print_table};
use anyhow::Context;
use pace_core::{Classifier, Level};
use std::io::Read;

pub fn run(words: &[String], explain: bool, json: bool) -> anyhow::Result<()> {
    let text = if words.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read description from stdin")?;
        buf
    } else {
        words.join(" ")
    };

    let analysis = Classifier.analyze(&text);

    if json {
        if explain {
            print_json(&analysis)?;
        } else {
            print_json(&analysis.classification)?;
        }
        return Ok(());
    }

    print_classification(&analysis.classification);

    if explain {
        println!();
        let rows = Level::all()
            .iter()
            .map(|&level| {
                vec![
                    level.number().to_string(),
                    level.as_str().to_string(),
                    analysis.raw[level.index()].to_string(),
                    format!("{:.2}", analysis.scores.get(level)),
                ]
            })
            .collect();
        print_table(&["LEVEL", "NAME", "MATCHES", "SCORE"], rows);
        println!();
        println!("Tone:       {}", analysis.tone);
        println!("Base level: {}", analysis.base_level);
    }

    Ok(())
}
