//! Delegate ("super") chains.
//!
//! A chain is an ordered list of levels, each holding at most one delegate
//! value. Level 0 is the head, which is what `super` reads and replaces.
//! Levels are checked first-added-first-checked: the first delegate handed to
//! the builder wins over later mixins.
//!
//! Two traversal policies exist:
//!
//! - **first-success**: attribute lookup, write forwarding, truth and
//!   initializer resolution walk the levels in order and stop at the first
//!   level that satisfies the request. Absent delegates and failing levels are
//!   skipped; only a failure at the final level reaches the caller.
//! - **collect-all**: attribute names are gathered from every level.
//!
//! Traversals that can run user code ([`truth`], [`initialize`]) work on a
//! snapshot of the levels so no borrow of the owning instance is held while
//! that code runs.

use tracing::trace;

use crate::runner::ds::error::{ObjectError, ObjectResult};
use crate::runner::ds::value::{Kwargs, Value};
use crate::runner::object::instance::Instance;
use crate::runner::plugin::types::EvalContext;

/// How far a traversal has descended below the instance it started from.
///
/// Every instance level entered counts one; structs do not. Descending past
/// `max` fails with `DelegateDepthError`, so chains grown from their bottom
/// end stay bounded even though each installation only sees the levels below
/// its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Depth {
    level: usize,
    max: usize,
}
impl Depth {
    pub fn root(max: usize) -> Self {
        Depth { level: 0, max }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn descend(self, owner: &str) -> ObjectResult<Depth> {
        if self.level >= self.max {
            return Err(ObjectError::DelegateDepthError(format!(
                "delegates below {} nest more than {} levels deep",
                owner, self.max
            )));
        }
        Ok(Depth {
            level: self.level + 1,
            max: self.max,
        })
    }
}

#[derive(Clone, Default)]
pub struct DelegateLevel {
    delegate: Option<Value>,
}
impl DelegateLevel {
    pub fn new(delegate: Option<Value>) -> Self {
        DelegateLevel { delegate }
    }

    pub fn delegate(&self) -> Option<&Value> {
        self.delegate.as_ref()
    }
}

#[derive(Default)]
pub struct DelegateChain {
    levels: Vec<DelegateLevel>,
}
impl DelegateChain {
    pub fn new() -> Self {
        DelegateChain { levels: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn head(&self) -> Option<&Value> {
        self.levels.first().and_then(|l| l.delegate())
    }

    /// Whether any level currently holds a delegate.
    pub fn has_delegate(&self) -> bool {
        self.levels.iter().any(|l| l.delegate.is_some())
    }

    /// Present delegates with their level index, in priority order.
    pub fn delegates(&self) -> Vec<(usize, Value)> {
        self.levels
            .iter()
            .enumerate()
            .filter_map(|(idx, l)| l.delegate.clone().map(|d| (idx, d)))
            .collect()
    }

    /// Whether level `index` currently holds `expected`.
    pub fn holds(&self, index: usize, expected: &Value) -> bool {
        self.levels
            .get(index)
            .and_then(|l| l.delegate())
            .map_or(false, |d| d == expected)
    }

    /// Appends a level. The previous levels keep their priority.
    pub fn mix_in(&mut self, delegate: Value) {
        self.levels.push(DelegateLevel::new(Some(delegate)));
    }

    /// Overwrites the head level only, discarding the previous head.
    /// `Value::None` leaves the head level empty.
    pub fn replace_head(&mut self, delegate: Value) {
        let delegate = match delegate {
            Value::None => None,
            d => Some(d),
        };
        match self.levels.first_mut() {
            Some(head) => head.delegate = delegate,
            None => self.levels.push(DelegateLevel::new(delegate)),
        }
    }

    pub(crate) fn install(&mut self, index: usize, delegate: Value) {
        if let Some(level) = self.levels.get_mut(index) {
            level.delegate = Some(delegate);
        }
    }

    /// First-success attribute lookup. Depth failures are never skipped.
    pub fn lookup(&self, name: &str, owner: &str, depth: Depth) -> ObjectResult<Option<Value>> {
        let mut last_error = None;
        for (idx, delegate) in self.delegates() {
            let found = match delegate.as_instance() {
                Some(inner) => depth
                    .descend(owner)
                    .and_then(|below| inner.lookup_within(name, below)),
                None => delegate.get_attr(name),
            };
            match found {
                Ok(Some(value)) => return Ok(Some(value)),
                Ok(None) => last_error = None,
                Err(e @ ObjectError::DelegateDepthError(_)) => return Err(e),
                Err(e) => {
                    trace!(level = idx, attr = name, error = %e, "delegate: lookup fell through");
                    last_error = Some(e);
                }
            }
        }
        match last_error {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }

    /// The first delegate that currently defines `name`, with the depth a
    /// forwarded write continues at.
    pub fn defining_delegate(
        &self,
        name: &str,
        owner: &str,
        depth: Depth,
    ) -> ObjectResult<Option<(Value, Depth)>> {
        for (_, delegate) in self.delegates() {
            match delegate.as_instance() {
                Some(inner) => {
                    let below = depth.descend(owner)?;
                    match inner.lookup_within(name, below) {
                        Ok(Some(_)) => return Ok(Some((delegate.clone(), below))),
                        Err(e @ ObjectError::DelegateDepthError(_)) => return Err(e),
                        _ => {}
                    }
                }
                None => {
                    if delegate.has_attr(name) {
                        return Ok(Some((delegate, depth)));
                    }
                }
            }
        }
        Ok(None)
    }

    /// Collect-all attribute names, level by level.
    pub fn attr_names(&self, owner: &str, depth: Depth) -> ObjectResult<Vec<String>> {
        let mut names = Vec::new();
        for (_, delegate) in self.delegates() {
            match delegate.as_instance() {
                Some(inner) => {
                    let below = depth.descend(owner)?;
                    names.append(&mut inner.attr_names_within(below)?);
                }
                None => names.append(&mut delegate.attr_names()?),
            }
        }
        Ok(names)
    }
}

/// First-success truth: the first present delegate decides, an exhausted
/// chain is false.
pub(crate) fn truth(owner: &Instance, ctx: &mut EvalContext, depth: Depth) -> ObjectResult<bool> {
    match owner.delegate_snapshot().into_iter().next() {
        Some((_, Value::Instance(inner))) => inner.truth_within(ctx, depth.descend(owner.name())?),
        Some((_, delegate)) => delegate.truth(ctx),
        None => Ok(false),
    }
}

/// Initializer resolution over the chain of `owner`.
///
/// Each level is treated as the head of the remaining chain: a template
/// delegate is initialized and, when an initializer ran, replaced in place by
/// its instance; an instance delegate is initialized recursively; anything
/// else has no initializer. Stops at the first level where an initializer ran.
/// A level rewritten by the initializer itself keeps the new value.
pub(crate) fn initialize(
    owner: &Instance,
    ctx: &mut EvalContext,
    args: Vec<Value>,
    kwargs: Kwargs,
    depth: Depth,
) -> ObjectResult<bool> {
    for (idx, delegate) in owner.delegate_snapshot() {
        let ran = match &delegate {
            Value::Template(proxy) => {
                let instance = proxy.instance().clone();
                let below = depth.descend(owner.name())?;
                let ran = instance.initialize_within(ctx, args.clone(), kwargs.clone(), below)?;
                if ran {
                    owner.install_delegate(idx, &delegate, Value::Instance(instance))?;
                }
                ran
            }
            Value::Instance(instance) => {
                let below = depth.descend(owner.name())?;
                instance.initialize_within(ctx, args.clone(), kwargs.clone(), below)?
            }
            _ => false,
        };
        if ran {
            return Ok(true);
        }
        trace!(owner = owner.name(), level = idx, "delegate: no initializer");
    }
    Ok(false)
}
