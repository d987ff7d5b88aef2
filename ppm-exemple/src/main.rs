use std::path::PathBuf;

use ppm_core::io::{list_files, read_file};
use ppm_core::model::bundle::ModelBundle;
use ppm_core::model::generator::{generate, join_symbols};
use ppm_core::model::prediction::predict_text;
use ppm_core::registry::ModelRegistry;
use ppm_core::tokenizer::Level;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Folder holding the training texts (.txt files), "./data" by default
    let folder = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "./data".to_owned()));

    // One session per text file, named after the file
    let mut registry = ModelRegistry::new();
    for file in list_files(&folder, "txt")? {
        let text = read_file(folder.join(&file))?;
        let session = file.trim_end_matches(".txt");
        match ModelBundle::train(&text, 5) {
            Ok(bundle) => {
                log::info!("Trained '{session}': {:?}", bundle.node_counts());
                registry.insert(session, bundle);
            }
            Err(e) => log::warn!("Skipping '{session}': {e}"),
        }
    }

    if registry.is_empty() {
        return Err(format!("No training text found in {}", folder.display()).into());
    }

    // Predict the next letter, word and sentence for a few prefixes
    let queries = [(Level::Letter, "th"), (Level::Word, "the"), (Level::Sentence, "")];
    for session in registry.session_ids() {
        let bundle = registry.get_mut(&session)?;
        for (level, input) in queries {
            let model = match bundle.model_mut(level) {
                Ok(model) => model,
                Err(e) => {
                    println!("[{session}] {e}");
                    continue;
                }
            };
            let report = predict_text(model, level, input, Some(5));
            println!("[{session}] {level} after {input:?} (perplexity {:.3}):", report.perplexity);
            for prediction in &report.predictions {
                println!("    {:?}: {:.4}", prediction.symbol, prediction.probability);
            }
        }

        // Sample a short continuation at word level
        if let Ok(model) = bundle.model(Level::Word) {
            let words = generate(model, Level::Word, "the", 12, &mut rand::rng());
            println!("[{session}] generated: {}", join_symbols(Level::Word, &words));
        }
    }

    Ok(())
}
