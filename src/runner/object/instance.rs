use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::runner::ds::error::{ObjectError, ObjectResult};
use crate::runner::ds::value::{Kwargs, Value};
use crate::runner::object::bound_method::BoundMethod;
use crate::runner::object::delegate::{self, DelegateChain, Depth};
use crate::runner::object::reserved::ReservedName;
use crate::runner::plugin::types::EvalContext;

/// The unit both templates and "instantiated" objects reduce to: a name tag,
/// own members and a delegate chain.
///
/// Instances are shared through `Rc` and mutated through interior cells, so
/// every holder of a delegate observes writes forwarded into it. No borrow of
/// `members` or `chain` is held across a call into user code.
pub struct Instance {
    id: Uuid,
    name: String,
    members: RefCell<BTreeMap<String, Value>>,
    chain: RefCell<DelegateChain>,
    frozen: Cell<bool>,
    max_delegate_depth: usize,
}

impl Instance {
    pub fn new(name: impl Into<String>, max_delegate_depth: usize) -> Self {
        Instance {
            id: Uuid::new_v4(),
            name: name.into(),
            members: RefCell::new(BTreeMap::new()),
            chain: RefCell::new(DelegateChain::new()),
            frozen: Cell::new(false),
            max_delegate_depth,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.name
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.get()
    }

    pub fn own_member(&self, name: &str) -> Option<Value> {
        self.members.borrow().get(name).cloned()
    }

    pub fn own_member_names(&self) -> Vec<String> {
        self.members.borrow().keys().cloned().collect()
    }

    pub fn has_delegate(&self) -> bool {
        self.chain.borrow().has_delegate()
    }

    /// The head delegate, `Value::None` when there is none.
    pub fn super_value(&self) -> Value {
        self.chain.borrow().head().cloned().unwrap_or(Value::None)
    }

    pub(crate) fn delegate_snapshot(&self) -> Vec<(usize, Value)> {
        self.chain.borrow().delegates()
    }

    /// Adds an own member without any write policy. Only the builder uses this,
    /// on an instance nobody else can see yet.
    pub(crate) fn define_member(&self, name: impl Into<String>, value: Value) {
        self.members.borrow_mut().insert(name.into(), value);
    }

    fn root_depth(&self) -> Depth {
        Depth::root(self.max_delegate_depth)
    }

    /// Attribute lookup that reports absence as `Ok(None)`.
    pub fn lookup(&self, name: &str) -> ObjectResult<Option<Value>> {
        self.lookup_within(name, self.root_depth())
    }

    pub(crate) fn lookup_within(&self, name: &str, depth: Depth) -> ObjectResult<Option<Value>> {
        if let Some(ReservedName::Super) = ReservedName::from_name(name) {
            return Ok(Some(self.super_value()));
        }
        if let Some(value) = self.own_member(name) {
            return Ok(Some(value));
        }
        self.chain.borrow().lookup(name, &self.name, depth)
    }

    pub fn get(&self, name: &str) -> ObjectResult<Value> {
        match self.lookup(name)? {
            Some(value) => Ok(value),
            None => Err(ObjectError::AttributeError(format!(
                "{} has no .{} field or method",
                self.name, name
            ))),
        }
    }

    pub fn has_attr(&self, name: &str) -> bool {
        matches!(self.lookup(name), Ok(Some(_)))
    }

    pub fn set(&self, name: &str, value: Value) -> ObjectResult<()> {
        self.set_within(name, value, self.root_depth())
    }

    fn set_within(&self, name: &str, value: Value, depth: Depth) -> ObjectResult<()> {
        self.check_not_frozen(name)?;
        if let Some(ReservedName::Super) = ReservedName::from_name(name) {
            return self.replace_super(value);
        }
        if let Some(slot) = self.members.borrow_mut().get_mut(name) {
            *slot = value;
            return Ok(());
        }

        let target = self.chain.borrow().defining_delegate(name, &self.name, depth)?;
        match target {
            Some((delegate, below)) => {
                trace!(owner = %self.name, attr = name, delegate = %delegate.type_name(), "object: forwarding write");
                match delegate.as_instance() {
                    Some(inner) => inner.set_within(name, value, below),
                    None => delegate.set_attr(name, value),
                }
            }
            None => {
                self.members.borrow_mut().insert(name.to_string(), value);
                Ok(())
            }
        }
    }

    /// Overwrites the head delegate, discarding the previous one.
    pub fn replace_super(&self, value: Value) -> ObjectResult<()> {
        self.check_not_frozen("super")?;
        self.check_delegate(&value)?;
        self.chain.borrow_mut().replace_head(value);
        Ok(())
    }

    /// Appends `value` as the lowest-priority delegate level.
    pub fn mix_in(&self, value: Value) -> ObjectResult<()> {
        self.check_not_frozen("super")?;
        self.check_delegate(&value)?;
        self.chain.borrow_mut().mix_in(value);
        Ok(())
    }

    /// Replaces level `index` with `value` if it still holds `expected`.
    pub(crate) fn install_delegate(&self, index: usize, expected: &Value, value: Value) -> ObjectResult<()> {
        if !self.chain.borrow().holds(index, expected) {
            trace!(instance = %self.name, level = index, "object: level rewritten during initialization");
            return Ok(());
        }
        self.check_not_frozen("super")?;
        self.check_delegate(&value)?;
        self.chain.borrow_mut().install(index, value);
        Ok(())
    }

    /// Own member names in lexicographic order, then every delegate level's
    /// names. Duplicates are kept.
    pub fn attr_names(&self) -> ObjectResult<Vec<String>> {
        self.attr_names_within(self.root_depth())
    }

    pub(crate) fn attr_names_within(&self, depth: Depth) -> ObjectResult<Vec<String>> {
        let mut names = self.own_member_names();
        names.append(&mut self.chain.borrow().attr_names(&self.name, depth)?);
        Ok(names)
    }

    /// Freezes this instance, its delegates and its member values. One-way.
    ///
    /// Walks instances with an explicit worklist, so chains of any length
    /// freeze without recursion.
    pub fn freeze(&self) {
        if self.frozen.replace(true) {
            return;
        }
        let mut pending = self.freeze_targets();
        while let Some(value) = pending.pop() {
            match value.as_instance() {
                Some(inner) => {
                    if !inner.frozen.replace(true) {
                        pending.append(&mut inner.freeze_targets());
                    }
                }
                None => value.freeze(),
            }
        }
    }

    fn freeze_targets(&self) -> Vec<Value> {
        let mut targets: Vec<Value> = self.members.borrow().values().cloned().collect();
        let delegates = self.delegate_snapshot();
        debug!(
            instance = %self.name,
            members = targets.len(),
            delegates = delegates.len(),
            "object: frozen"
        );
        targets.extend(delegates.into_iter().map(|(_, d)| d));
        targets
    }

    pub fn hash(&self) -> ObjectResult<u64> {
        Err(ObjectError::NotHashableError(format!(
            "unhashable: {}",
            self.type_name()
        )))
    }

    /// Resolves a hook to a bound method. Anything else, including a failed
    /// lookup, counts as absent.
    pub fn hook(&self, hook: ReservedName) -> Option<Rc<BoundMethod>> {
        debug_assert!(hook.is_hook());
        match self.lookup(hook.as_str()) {
            Ok(Some(Value::Method(method))) => Some(method),
            _ => None,
        }
    }

    pub fn to_str(&self, ctx: &mut EvalContext) -> ObjectResult<String> {
        if let Some(hook) = self.hook(ReservedName::Str) {
            match hook.call(ctx, vec![], vec![])? {
                Value::String(s) => return Ok(s),
                other => warn!(
                    instance = %self.name,
                    result = %other.type_name(),
                    "object: __str__ did not return a string"
                ),
            }
        }
        self.structural_str()
    }

    pub fn structural_str(&self) -> ObjectResult<String> {
        Ok(format!("{}({})", self.name, self.attr_names()?.join(", ")))
    }

    pub fn truth(&self, ctx: &mut EvalContext) -> ObjectResult<bool> {
        self.truth_within(ctx, self.root_depth())
    }

    pub(crate) fn truth_within(&self, ctx: &mut EvalContext, depth: Depth) -> ObjectResult<bool> {
        if let Some(hook) = self.hook(ReservedName::Bool) {
            match hook.call(ctx, vec![], vec![])? {
                Value::Boolean(b) => return Ok(b),
                other => warn!(
                    instance = %self.name,
                    result = %other.type_name(),
                    "object: __bool__ did not return a bool"
                ),
            }
        }
        self.structural_truth_within(ctx, depth)
    }

    /// Empty instances are false, everything else defers to the chain.
    pub fn structural_truth(&self, ctx: &mut EvalContext) -> ObjectResult<bool> {
        self.structural_truth_within(ctx, self.root_depth())
    }

    fn structural_truth_within(&self, ctx: &mut EvalContext, depth: Depth) -> ObjectResult<bool> {
        if self.members.borrow().is_empty() && !self.has_delegate() {
            return Ok(false);
        }
        delegate::truth(self, ctx, depth)
    }

    /// Runs the initializer protocol. Returns whether an initializer ran.
    pub(crate) fn initialize(
        &self,
        ctx: &mut EvalContext,
        args: Vec<Value>,
        kwargs: Kwargs,
    ) -> ObjectResult<bool> {
        self.initialize_within(ctx, args, kwargs, self.root_depth())
    }

    pub(crate) fn initialize_within(
        &self,
        ctx: &mut EvalContext,
        args: Vec<Value>,
        kwargs: Kwargs,
        depth: Depth,
    ) -> ObjectResult<bool> {
        if let Some(Value::Method(init)) = self.own_member(ReservedName::Init.as_str()) {
            trace!(instance = %self.name, "object: running own __init__");
            init.call(ctx, args, kwargs)?;
            return Ok(true);
        }
        delegate::initialize(self, ctx, args, kwargs, depth)
    }

    fn check_not_frozen(&self, name: &str) -> ObjectResult<()> {
        if self.frozen.get() {
            Err(ObjectError::FrozenError(format!(
                "cannot set .{} on frozen {}",
                name, self.name
            )))
        } else {
            Ok(())
        }
    }

    fn check_delegate(&self, value: &Value) -> ObjectResult<()> {
        match value.as_instance() {
            Some(inner) => inner.check_nesting(self, self.root_depth().descend(&self.name)?),
            None => Ok(()),
        }
    }

    /// Walks the instance levels from this one down, `depth` being where this
    /// one would sit below `receiver`. Fails if `receiver` is reachable or the
    /// walk nests deeper than allowed.
    fn check_nesting(&self, receiver: &Instance, depth: Depth) -> ObjectResult<()> {
        if self.id == receiver.id {
            return Err(ObjectError::DelegateCycleError(format!(
                "{} would become its own delegate",
                receiver.name
            )));
        }
        for (_, delegate) in self.delegate_snapshot() {
            if let Some(inner) = delegate.as_instance() {
                inner.check_nesting(receiver, depth.descend(&self.name)?)?;
            }
        }
        Ok(())
    }
}
