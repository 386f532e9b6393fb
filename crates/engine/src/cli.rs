//! Command line surface.
//!
//! Every command prints a JSON document on success. Characters are
//! addressed by id or by name.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use holocron_domain::{AdvancementPlan, Career, Character, CharacterId, Characteristic, Species};
use serde::Serialize;
use serde_json::{json, Value};

use crate::app::App;
use crate::infrastructure::config::{EngineConfig, StorageBackend};
use crate::use_cases::AdvancementError;

const DEFAULT_AWARD_REASON: &str = "XP award";

#[derive(Debug, Parser)]
#[command(name = "holocron", version, about = "Character advancement and XP ledger", long_about = None)]
pub struct Arguments {
    /// Directory holding character JSON files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Storage backend: file or memory
    #[arg(long, global = true)]
    pub storage: Option<StorageBackend>,

    #[command(subcommand)]
    pub command: Command,
}

impl Arguments {
    /// Apply command line overrides on top of the environment configuration.
    pub fn apply(&self, mut config: EngineConfig) -> EngineConfig {
        if let Some(ref dir) = self.data_dir {
            config = config.with_data_dir(dir);
        }
        if let Some(storage) = self.storage {
            config = config.with_storage(storage);
        }
        config
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a character in the creation phase
    Create {
        name: String,
        #[arg(long)]
        species: Species,
        #[arg(long)]
        career: Option<Career>,
    },
    /// Print a character
    Show { character: String },
    /// End the creation phase; characteristics are locked afterwards
    Finalize { character: String },
    /// Grant XP
    Award {
        character: String,
        amount: u32,
        #[arg(long, default_value = DEFAULT_AWARD_REASON)]
        reason: String,
    },
    /// Buy one point of a characteristic
    AdvanceCharacteristic {
        character: String,
        characteristic: Characteristic,
    },
    /// Buy one rank of a skill
    AdvanceSkill { character: String, skill: String },
    /// Lower a characteristic by one and refund the XP
    ReduceCharacteristic {
        character: String,
        characteristic: Characteristic,
    },
    /// Lower a skill by one rank and refund the XP
    ReduceSkill { character: String, skill: String },
    /// List every affordable advancement
    Options { character: String },
    /// Price a JSON advancement plan without applying it
    Simulate { character: String, plan: PathBuf },
    /// List stored characters
    List,
    /// Delete a character
    Delete { character: String },
}

/// One line of `list` output.
#[derive(Debug, Serialize)]
struct CharacterSummary {
    id: CharacterId,
    name: String,
    species: String,
    career: Option<String>,
    is_created: bool,
    total_xp: u32,
    available_xp: u32,
}

impl From<&Character> for CharacterSummary {
    fn from(character: &Character) -> Self {
        Self {
            id: character.id(),
            name: character.name().to_string(),
            species: character.species().to_string(),
            career: character.career().map(|c| c.to_string()),
            is_created: character.is_created(),
            total_xp: character.ledger().total(),
            available_xp: character.ledger().available(),
        }
    }
}

/// Run one command against the application and return its JSON output.
pub async fn execute(app: &App, command: Command) -> anyhow::Result<Value> {
    let use_cases = &app.use_cases;
    let output = match command {
        Command::Create {
            name,
            species,
            career,
        } => to_json(&use_cases.creation.create(&name, species, career).await?)?,
        Command::Show { character } => to_json(&use_cases.roster.resolve(&character).await?)?,
        Command::Finalize { character } => {
            let id = resolve_id(app, &character).await?;
            to_json(&use_cases.creation.finalize(id).await?)?
        }
        Command::Award {
            character,
            amount,
            reason,
        } => {
            let id = resolve_id(app, &character).await?;
            let ledger = use_cases
                .advancement
                .award_xp(id, amount, &reason)
                .await
                .map_err(refusal)?;
            json!({ "character_id": id, "ledger": ledger })
        }
        Command::AdvanceCharacteristic {
            character,
            characteristic,
        } => {
            let id = resolve_id(app, &character).await?;
            let result = use_cases
                .advancement
                .advance_characteristic(id, characteristic)
                .await
                .map_err(refusal)?;
            to_json(&result)?
        }
        Command::AdvanceSkill { character, skill } => {
            let id = resolve_id(app, &character).await?;
            let result = use_cases
                .advancement
                .advance_skill(id, &skill)
                .await
                .map_err(refusal)?;
            to_json(&result)?
        }
        Command::ReduceCharacteristic {
            character,
            characteristic,
        } => {
            let id = resolve_id(app, &character).await?;
            let result = use_cases
                .advancement
                .reduce_characteristic(id, characteristic)
                .await
                .map_err(refusal)?;
            to_json(&result)?
        }
        Command::ReduceSkill { character, skill } => {
            let id = resolve_id(app, &character).await?;
            let result = use_cases
                .advancement
                .reduce_skill(id, &skill)
                .await
                .map_err(refusal)?;
            to_json(&result)?
        }
        Command::Options { character } => {
            let id = resolve_id(app, &character).await?;
            let options = use_cases.advancement.options(id).await.map_err(refusal)?;
            to_json(&options)?
        }
        Command::Simulate { character, plan } => {
            let id = resolve_id(app, &character).await?;
            let plan = read_plan(&plan).await?;
            let result = use_cases
                .advancement
                .simulate(id, &plan)
                .await
                .map_err(refusal)?;
            to_json(&result)?
        }
        Command::List => {
            let characters = use_cases.roster.list().await?;
            let summaries: Vec<CharacterSummary> =
                characters.iter().map(CharacterSummary::from).collect();
            to_json(&summaries)?
        }
        Command::Delete { character } => {
            let id = resolve_id(app, &character).await?;
            use_cases.roster.delete(id).await?;
            json!({ "deleted": id })
        }
    };
    Ok(output)
}

async fn resolve_id(app: &App, reference: &str) -> anyhow::Result<CharacterId> {
    Ok(app.use_cases.roster.resolve(reference).await?.id())
}

async fn read_plan(path: &Path) -> anyhow::Result<AdvancementPlan> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read plan file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse plan file {}", path.display()))
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Append the rule that refused an operation to the headline message.
fn refusal(err: AdvancementError) -> anyhow::Error {
    match err.block() {
        Some(block) => anyhow::anyhow!("{}: {}", err, block),
        None => anyhow::Error::new(err),
    }
}
