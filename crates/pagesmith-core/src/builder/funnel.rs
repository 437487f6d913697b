//! Funnels: ordered pages (steps) that a visitor walks through.

use super::tree::{MoveDirection, PageTree, Section};
use super::NodeId;
use crate::error::DocumentResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role a step plays in the funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKind {
    #[default]
    Landing,
    Optin,
    Sales,
    Checkout,
    Upsell,
    Downsell,
    ThankYou,
    Webinar,
}

/// One page of a funnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStep {
    pub id: NodeId,
    pub name: String,
    pub kind: StepKind,
    pub order: usize,
    #[serde(default)]
    pub sections: Vec<Section>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FunnelStep {
    pub fn new(name: impl Into<String>, kind: StepKind) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            order: 0,
            sections: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The step's content as a tree for editing.
    pub fn tree(&self) -> PageTree {
        PageTree::from_sections(self.sections.clone())
    }
}

/// A named, ordered list of steps with one current step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Funnel {
    pub id: NodeId,
    pub name: String,
    steps: Vec<FunnelStep>,
    current_step: NodeId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Funnel {
    /// A funnel with a single empty landing step.
    pub fn new(name: impl Into<String>) -> Self {
        let first = FunnelStep::new("Landing Page", StepKind::Landing);
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            current_step: first.id,
            steps: vec![first],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn steps(&self) -> &[FunnelStep] {
        &self.steps
    }

    pub fn step(&self, id: NodeId) -> Option<&FunnelStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn current_step_id(&self) -> NodeId {
        self.current_step
    }

    pub fn current_step(&self) -> Option<&FunnelStep> {
        self.step(self.current_step)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn renumber(&mut self) {
        for (i, step) in self.steps.iter_mut().enumerate() {
            step.order = i;
        }
    }

    /// Append a step and return its id. The current step is unchanged.
    pub fn add_step(&mut self, name: impl Into<String>, kind: StepKind) -> NodeId {
        let mut step = FunnelStep::new(name, kind);
        step.order = self.steps.len();
        let id = step.id;
        self.steps.push(step);
        self.touch();
        id
    }

    /// Remove a step. The last remaining step cannot be removed.
    ///
    /// Removing the current step makes its predecessor (or the new first
    /// step) current.
    pub fn remove_step(&mut self, id: NodeId) -> bool {
        if self.steps.len() <= 1 {
            log::debug!("Refusing to remove the only funnel step");
            return false;
        }
        let Some(index) = self.steps.iter().position(|s| s.id == id) else {
            return false;
        };
        self.steps.remove(index);
        self.renumber();
        if self.current_step == id {
            self.current_step = self.steps[index.saturating_sub(1)].id;
        }
        self.touch();
        true
    }

    pub fn rename_step(&mut self, id: NodeId, name: impl Into<String>) -> bool {
        let Some(step) = self.steps.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        step.name = name.into();
        step.updated_at = Utc::now();
        self.touch();
        true
    }

    pub fn move_step(&mut self, id: NodeId, direction: MoveDirection) -> bool {
        let Some(index) = self.steps.iter().position(|s| s.id == id) else {
            return false;
        };
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.steps.len() => index + 1,
            _ => return false,
        };
        self.steps.swap(index, target);
        self.renumber();
        self.touch();
        true
    }

    /// Switch the step being edited.
    pub fn set_current(&mut self, id: NodeId) -> bool {
        if self.step(id).is_none() {
            return false;
        }
        self.current_step = id;
        true
    }

    /// Write the editing buffer back into the current step.
    pub fn commit_sections(&mut self, tree: &PageTree) {
        self.store_sections(self.current_step, tree);
    }

    /// Write a page tree into a specific step.
    pub fn store_sections(&mut self, id: NodeId, tree: &PageTree) -> bool {
        let Some(step) = self.steps.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        step.sections = tree.sections.clone();
        step.updated_at = Utc::now();
        self.touch();
        true
    }

    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> DocumentResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
