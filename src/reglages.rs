// src/reglages.rs
//
// Réglages de l’application (fichier TOML facultatif).
//
// Ordre de recherche : chemin explicite, sinon $CALCULATRICE_CONFIG,
// sinon valeurs par défaut. Tous les champs sont facultatifs.
//
//   precision = 30
//   mode = "nombres"
//   niveau_journal = "debug"
//
//   [priorites]
//   "+" = 2
//   "*" = 1

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{anyhow, Context};
use serde_derive::Deserialize;
use tracing::{info, instrument};
use tracing_subscriber::filter::LevelFilter;

use crate::noyau::exact::{PRECISION_DEFAUT, PRECISION_MAX};
use crate::noyau::{Mode, TablePriorites};

/// Variable d’environnement désignant le fichier de réglages.
pub const VAR_REGLAGES: &str = "CALCULATRICE_CONFIG";

#[derive(Deserialize, Default, Debug, Clone, PartialEq)]
pub struct Reglages {
    /// Décimales affichées en mode exact (bornée à PRECISION_MAX).
    pub precision: Option<usize>,

    /// Mode au démarrage : "exact", "nombres" ou "flottant".
    pub mode: Option<String>,

    /// Symbole -> priorité, fusionnées sur la table complète.
    /// Ne concerne que les modes nombres et flottant.
    pub priorites: Option<HashMap<String, u32>>,

    /// "off", "error", "warn", "info", "debug" ou "trace".
    pub niveau_journal: Option<String>,
}

#[instrument(skip_all)]
pub fn lire_reglages(chemin: Option<&Path>) -> anyhow::Result<Reglages> {
    let chemin = chemin
        .map(PathBuf::from)
        .or_else(|| env::var_os(VAR_REGLAGES).map(PathBuf::from));

    let Some(chemin) = chemin else {
        info!("aucun fichier de réglages, valeurs par défaut");
        return Ok(Reglages::default());
    };

    info!("lecture des réglages ({})", chemin.display());
    let texte = fs::read_to_string(&chemin)
        .with_context(|| format!("lecture du fichier de réglages {}", chemin.display()))?;
    let reglages = toml::from_str(&texte).context("analyse du fichier de réglages")?;
    Ok(reglages)
}

impl Reglages {
    pub fn precision(&self) -> usize {
        self.precision.unwrap_or(PRECISION_DEFAUT).min(PRECISION_MAX)
    }

    pub fn mode(&self) -> anyhow::Result<Mode> {
        match self.mode.as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("exact") => Ok(Mode::Exact),
            Some("nombres") => Ok(Mode::Nombres),
            Some("flottant") => Ok(Mode::Flottant),
            Some(autre) => Err(anyhow!("mode inconnu: {autre:?}")),
        }
    }

    /// Table complète, surchargée par `[priorites]`.
    pub fn table_priorites(&self) -> anyhow::Result<TablePriorites> {
        let base = TablePriorites::complete();
        let Some(priorites) = &self.priorites else {
            return Ok(base.clone());
        };
        let surcharge =
            TablePriorites::depuis_symboles(priorites.iter().map(|(s, p)| (s.as_str(), *p)))
                .context("section [priorites]")?;
        Ok(base.fusion(&surcharge))
    }

    pub fn niveau_journal(&self) -> anyhow::Result<LevelFilter> {
        match &self.niveau_journal {
            None => Ok(LevelFilter::INFO),
            Some(n) => n
                .parse::<LevelFilter>()
                .map_err(|e| anyhow!("niveau_journal {n:?}: {e}")),
        }
    }
}
