//! Startup validation of action bindings
//!
//! Runs once, before the first frame. A capability whose binding is not
//! registered with the input system is switched off for the whole session.

use crate::config::{CapabilityFlags, InputBindings};
use std::fmt;
use warden_runtime::ActionRegistry;

/// A capability that depends on input bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Move,
    Jump,
    Sprint,
    Freefly,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Move => "Movement",
            Capability::Jump => "Jumping",
            Capability::Sprint => "Sprinting",
            Capability::Freefly => "Freefly",
        };
        f.write_str(name)
    }
}

impl CapabilityFlags {
    /// Copy of these flags with one capability switched off
    pub fn without(self, capability: Capability) -> Self {
        let mut flags = self;
        match capability {
            Capability::Move => flags.can_move = false,
            Capability::Jump => flags.can_jump = false,
            Capability::Sprint => flags.can_sprint = false,
            Capability::Freefly => flags.can_freefly = false,
        }
        flags
    }
}

/// A binding that could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingBinding {
    pub capability: Capability,
    /// Which binding field was checked (`input_left`, `input_jump`, ...)
    pub field: &'static str,
    /// The action name that was not registered
    pub action: String,
}

impl fmt::Display for MissingBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} disabled. No input action found for {}: {}",
            self.capability, self.field, self.action
        )
    }
}

/// Outcome of [`validate_bindings`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Capabilities the controller will actually use
    pub effective: CapabilityFlags,
    /// One entry per capability that was switched off
    pub missing: Vec<MissingBinding>,
}

/// Compute effective capabilities from the requested ones and the registered actions.
///
/// Only requested capabilities are checked, and empty binding names are skipped.
/// Movement needs all four directional bindings; the first missing one disables
/// it and is the one reported. Gravity has no binding and is never touched.
pub fn validate_bindings(
    requested: CapabilityFlags,
    bindings: &InputBindings,
    registry: &impl ActionRegistry,
) -> ValidationReport {
    let checks: [(Capability, bool, &'static str, &str); 7] = [
        (Capability::Move, requested.can_move, "input_left", bindings.left.as_str()),
        (Capability::Move, requested.can_move, "input_right", bindings.right.as_str()),
        (Capability::Move, requested.can_move, "input_forward", bindings.forward.as_str()),
        (Capability::Move, requested.can_move, "input_back", bindings.back.as_str()),
        (Capability::Jump, requested.can_jump, "input_jump", bindings.jump.as_str()),
        (Capability::Sprint, requested.can_sprint, "input_sprint", bindings.sprint.as_str()),
        (Capability::Freefly, requested.can_freefly, "input_freefly", bindings.freefly.as_str()),
    ];

    let mut effective = requested;
    let mut missing: Vec<MissingBinding> = Vec::new();

    for (capability, wanted, field, action) in checks {
        let already_disabled = missing.iter().any(|m| m.capability == capability);
        if !wanted || already_disabled || action.is_empty() {
            continue;
        }
        if !registry.has_action(action) {
            effective = effective.without(capability);
            missing.push(MissingBinding {
                capability,
                field,
                action: action.to_string(),
            });
        }
    }

    ValidationReport { effective, missing }
}
