//! Cutscene scripts: a JSON description of where text goes and what gets typed into it.
//!
//! ```json
//! {
//!   "surfaces": { "title": { "x": 2, "y": 1, "width": 40 } },
//!   "defaults": { "waitAfterLetter": 40 },
//!   "steps": [
//!     { "surface": "title", "text": "Hello." },
//!     { "surface": "title", "options": { "blockingCompletionAction": { "wait": 500 } } }
//!   ]
//! }
//! ```
//!
//! Steps without `options` use the script's `defaults`, or the crate's [`DEFAULT_OPTIONS`](crate::DEFAULT_OPTIONS)
//! if the script has none. Options that are given only need the fields that differ from `DEFAULT_OPTIONS`.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
    rc::Rc,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    surface::Surface,
    task::{Task, TaskOptions},
};

/// A rectangle of the display for one surface: top-left corner, and how many columns before wrapping.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
}

/// One task, referring to its surface by name.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Step {
    pub surface: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub options: Option<TaskOptions>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub surfaces: BTreeMap<String, Region>,
    #[serde(default)]
    pub defaults: Option<TaskOptions>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Turn every step into a [`Task`], in order, looking up surfaces by name.
    ///
    /// Fails if a step names a surface that isn't in `surfaces`.
    pub fn tasks(&self, surfaces: &HashMap<String, Rc<dyn Surface>>) -> Result<Vec<Task>> {
        self.steps
            .iter()
            .map(|step| {
                let target = surfaces
                    .get(&step.surface)
                    .ok_or_else(|| Error::from(format!("step refers to unknown surface {:?}", step.surface)))?;
                Ok(Task {
                    target: target.clone(),
                    text: step.text.clone(),
                    options: step.options.clone().or_else(|| self.defaults.clone()),
                })
            })
            .collect()
    }
}
