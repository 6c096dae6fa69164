// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Model Artifact Inspector

Prints the header, metadata and shape of dialogaze model artifacts and which
pipeline input each one fits.

Usage:
  cargo run --bin model_info -- <artifact.dgz>... [--json]

Example:
  cargo run --bin model_info -- data_files/spk_vfoa_dur.dgz data_files/spk_vfoa_dir.dgz
*/

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use dialogaze::encoding::PipelineKind;
use dialogaze::models::{load_model, ModelArtifact, ModelKind};

#[derive(Parser, Debug)]
#[command(name = "model_info", version, about = "Inspect dialogaze model artifacts")]
struct Args {
    /// Artifact files to inspect
    #[arg(required = true)]
    artifacts: Vec<PathBuf>,

    /// Print one JSON object per artifact instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn fits(artifact: &ModelArtifact) -> Option<PipelineKind> {
    [PipelineKind::Addressee, PipelineKind::Vfoa]
        .into_iter()
        .find(|kind| kind.vector_len() == artifact.model.input_len())
}

fn print_text(path: &std::path::Path, artifact: &ModelArtifact) {
    println!("📦 {}", path.display());
    println!("  Format version: {}", artifact.version);
    println!("  Kind:           {}", artifact.model.kind_name());
    println!(
        "  Shape:          {} inputs -> {} outputs",
        artifact.model.input_len(),
        artifact.model.output_len()
    );
    match fits(artifact) {
        Some(kind) => println!("  Fits pipeline:  {}", kind),
        None => println!("  Fits pipeline:  none"),
    }
    match &artifact.model {
        ModelKind::Classifier(classifier) => {
            println!("  Labels:         {}", classifier.labels().join(", "))
        }
        ModelKind::MultiLabel(model) => println!("  Threshold:      {}", model.threshold()),
        ModelKind::Regressor(_) => {}
    }
    if !artifact.metadata.description.is_empty() {
        println!("  Description:    {}", artifact.metadata.description);
    }
    println!("  Source:         {}", artifact.metadata.source);
    println!("  Created at:     {}", artifact.metadata.created_at);
}

fn print_json(path: &std::path::Path, artifact: &ModelArtifact) -> Result<()> {
    let summary = serde_json::json!({
        "path": path.display().to_string(),
        "version": artifact.version,
        "kind": artifact.model.kind_name(),
        "input_len": artifact.model.input_len(),
        "output_len": artifact.model.output_len(),
        "pipeline": fits(artifact).map(|kind| kind.name()),
        "metadata": artifact.metadata,
    });
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    for path in &args.artifacts {
        let artifact =
            load_model(path).with_context(|| format!("Failed to load {}", path.display()))?;
        if args.json {
            print_json(path, &artifact)?;
        } else {
            print_text(path, &artifact);
        }
    }
    Ok(())
}
