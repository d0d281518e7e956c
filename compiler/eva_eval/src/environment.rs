//! Lexical environments.
//!
//! Scopes live in an arena owned by one interpreter session and refer to
//! their parent by [`ScopeId`]. A new scope is pushed for every block entry
//! and every closure call; closures hold the id of the scope they captured.
//!
//! # Definition vs. assignment
//!
//! - [`Environment::define`] always writes to the given scope's own record,
//!   creating or overwriting the binding. This is how shadowing works.
//! - [`Environment::assign`] finds the nearest scope on the chain that
//!   already binds the name and overwrites it there. It never creates a
//!   binding.
//!
//! # Reclamation
//!
//! A scope is kept while something can still reach it: an evaluation that
//! is running in it, a live child scope, or a closure that captured it.
//!
//! - [`Environment::release`] ends an evaluation's hold. A scope nothing
//!   captured and with no live children is freed on the spot, and its
//!   parent with it if that was the last thing keeping the parent.
//! - Captured scopes are left to [`Environment::collect_garbage`], a
//!   mark-and-sweep over the arena. Closures are created through
//!   [`Environment::capture`], which keeps a weak handle to each one.
//!   Closures held outside the arena (by an evaluation in progress or by
//!   the host) are detected by comparing their strong count with the
//!   references stored in scope records. Cycles between a scope and a
//!   closure stored in it are collected.
//!
//! Collection runs automatically once enough captured scopes have been
//! released since the last pass.

use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use crate::{Closure, EvalError, EvalResult, Value};

/// Released captured scopes that trigger an automatic collection.
const MIN_GC_THRESHOLD: usize = 256;

/// Index of a scope in its [`Environment`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The root scope every environment starts with.
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One scope: its own bindings and a link to the enclosing scope.
#[derive(Debug, Default)]
pub struct Scope {
    record: FxHashMap<Rc<str>, Value>,
    parent: Option<ScopeId>,
    /// Set once a closure captures this scope.
    captured: bool,
    /// An evaluation is running in this scope.
    active: bool,
    /// Live scopes whose parent is this one.
    children: u32,
}

impl Scope {
    fn with_parent(parent: ScopeId) -> Self {
        Scope {
            record: FxHashMap::default(),
            parent: Some(parent),
            captured: false,
            active: true,
            children: 0,
        }
    }

    fn closures(&self) -> impl Iterator<Item = &Rc<Closure>> {
        self.record.values().filter_map(|value| match value {
            Value::Closure(closure) => Some(closure),
            _ => None,
        })
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Binding in this scope only.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.record.get(name)
    }

    pub fn len(&self) -> usize {
        self.record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    /// Names bound directly in this scope, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.record.keys().map(|k| &**k)
    }
}

#[derive(Debug)]
enum Slot {
    Occupied(Scope),
    Vacant { next_free: Option<ScopeId> },
}

/// Arena of scopes for one interpreter session.
#[derive(Debug)]
pub struct Environment {
    slots: Vec<Slot>,
    free_head: Option<ScopeId>,
    live: usize,
    /// Every closure capturing a non-root scope, with that scope.
    closures: Vec<(Weak<Closure>, ScopeId)>,
    /// Captured scopes that are no longer active.
    collectable: usize,
    /// `collectable` right after the last collection.
    retained: usize,
    gc_threshold: usize,
}

impl Environment {
    /// Create an environment holding only an empty root scope.
    pub fn new() -> Self {
        Environment {
            slots: vec![Slot::Occupied(Scope::default())],
            free_head: None,
            live: 1,
            closures: Vec::new(),
            collectable: 0,
            retained: 0,
            gc_threshold: MIN_GC_THRESHOLD,
        }
    }

    #[inline]
    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    /// Number of scopes currently allocated, including the root.
    pub fn live_scopes(&self) -> usize {
        self.live
    }

    /// Captured scopes that no evaluation holds any more. Some of them may
    /// still be reachable through a closure.
    pub fn collectable_scopes(&self) -> usize {
        self.collectable
    }

    /// Scope by id, or `None` if it was released.
    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        match self.slots.get(id.index()) {
            Some(Slot::Occupied(scope)) => Some(scope),
            _ => None,
        }
    }

    fn scope_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        match self.slots.get_mut(id.index()) {
            Some(Slot::Occupied(scope)) => Some(scope),
            _ => None,
        }
    }

    /// Allocate an empty scope whose parent is `parent`.
    ///
    /// The new scope counts as active until it is [released](Self::release).
    pub fn push_scope(&mut self, parent: ScopeId) -> ScopeId {
        if let Some(p) = self.scope_mut(parent) {
            p.children += 1;
        }
        let scope = Scope::with_parent(parent);
        self.live += 1;
        if let Some(id) = self.free_head {
            if let Some(slot) = self.slots.get_mut(id.index()) {
                self.free_head = match slot {
                    Slot::Vacant { next_free } => *next_free,
                    Slot::Occupied(_) => None,
                };
                *slot = Slot::Occupied(scope);
                return id;
            }
        }
        let id = ScopeId(u32::try_from(self.slots.len()).unwrap_or(u32::MAX));
        self.slots.push(Slot::Occupied(scope));
        id
    }

    /// Bind `name` in `scope` itself, never searching parents.
    ///
    /// Overwrites an existing binding of the same name in that scope and
    /// returns the bound value.
    pub fn define(&mut self, scope: ScopeId, name: impl Into<Rc<str>>, value: Value) -> Value {
        if let Some(s) = self.scope_mut(scope) {
            s.record.insert(name.into(), value.clone());
        }
        value
    }

    /// Nearest scope on the chain starting at `scope` that binds `name`.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Result<ScopeId, EvalError> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let Some(s) = self.scope(id) else { break };
            if s.record.contains_key(name) {
                return Ok(id);
            }
            current = s.parent;
        }
        Err(EvalError::unbound(name))
    }

    /// Value of the nearest binding of `name`.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> EvalResult {
        let owner = self.resolve(scope, name)?;
        self.scope(owner)
            .and_then(|s| s.record.get(name))
            .cloned()
            .ok_or_else(|| EvalError::unbound(name))
    }

    /// Overwrite the nearest existing binding of `name`.
    ///
    /// Fails with `UnboundVariable` if no scope on the chain binds it.
    pub fn assign(&mut self, scope: ScopeId, name: &str, value: Value) -> EvalResult {
        let owner = self.resolve(scope, name)?;
        let slot = self
            .scope_mut(owner)
            .and_then(|s| s.record.get_mut(name))
            .ok_or_else(|| EvalError::unbound(name))?;
        *slot = value.clone();
        Ok(value)
    }

    /// Allocate a closure, marking the scope it captured.
    ///
    /// Closures built any other way are invisible to the collector, which
    /// may then free their scope while they are still held.
    pub fn capture(&mut self, closure: Closure) -> Rc<Closure> {
        let env = closure.env();
        let closure = Rc::new(closure);
        if env != ScopeId::ROOT {
            self.mark_captured(env);
            self.closures.push((Rc::downgrade(&closure), env));
        }
        closure
    }

    fn mark_captured(&mut self, scope: ScopeId) {
        if scope == ScopeId::ROOT {
            return;
        }
        let Some(s) = self.scope_mut(scope) else {
            return;
        };
        if s.captured {
            return;
        }
        s.captured = true;
        if !s.active {
            self.collectable += 1;
        }
    }

    /// End the hold an evaluation has on a block or activation scope.
    ///
    /// Uncaptured scopes without live children are cleared and their slot
    /// reused at once. Captured scopes wait for the next collection. The
    /// root is never released.
    pub fn release(&mut self, scope: ScopeId) {
        if scope == ScopeId::ROOT {
            return;
        }
        let Some(s) = self.scope_mut(scope) else {
            return;
        };
        if !s.active {
            return;
        }
        s.active = false;
        if s.captured {
            self.collectable += 1;
            if self.collectable >= self.gc_threshold {
                self.collect_garbage();
            }
        } else {
            self.try_free(scope);
        }
    }

    /// Collect if captured scopes were released since the last collection.
    ///
    /// Returns the number of scopes freed.
    pub fn collect_released(&mut self) -> usize {
        if self.collectable > self.retained {
            self.collect_garbage()
        } else {
            0
        }
    }

    /// Free every scope no evaluation, host-held closure or reachable scope
    /// refers to. Returns the number of scopes freed.
    pub fn collect_garbage(&mut self) -> usize {
        let mut stored: FxHashMap<*const Closure, usize> = FxHashMap::default();
        for scope in self.occupied().map(|(_, scope)| scope) {
            for closure in scope.closures() {
                *stored.entry(Rc::as_ptr(closure)).or_default() += 1;
            }
        }

        let mut pending = vec![ScopeId::ROOT];
        pending.extend(
            self.occupied()
                .filter(|(_, scope)| scope.active)
                .map(|(id, _)| id),
        );
        self.closures.retain(|(closure, env)| {
            let strong = closure.strong_count();
            let in_records = stored.get(&closure.as_ptr()).copied().unwrap_or(0);
            if strong > in_records {
                pending.push(*env);
            }
            strong > 0
        });

        let mut marked = vec![false; self.slots.len()];
        while let Some(id) = pending.pop() {
            match marked.get_mut(id.index()) {
                Some(seen) if !*seen => *seen = true,
                _ => continue,
            }
            let Some(scope) = self.scope(id) else { continue };
            pending.extend(scope.parent);
            pending.extend(scope.closures().map(|closure| closure.env()));
        }

        let mut orphaned = Vec::new();
        let mut freed = 0;
        for (index, is_marked) in (0..).zip(marked) {
            let id = ScopeId(index);
            if is_marked {
                continue;
            }
            let Some(scope) = self.vacate(id) else { continue };
            if scope.captured {
                self.collectable = self.collectable.saturating_sub(1);
            }
            orphaned.extend(scope.parent);
            freed += 1;
        }
        for parent in orphaned {
            if let Some(p) = self.scope_mut(parent) {
                p.children = p.children.saturating_sub(1);
            }
        }

        self.retained = self.collectable;
        self.gc_threshold = MIN_GC_THRESHOLD.max(self.collectable * 2);
        tracing::debug!(freed, live = self.live, "collected scopes");
        freed
    }

    fn occupied(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        (0..).zip(&self.slots).filter_map(|(index, slot)| match slot {
            Slot::Occupied(scope) => Some((ScopeId(index), scope)),
            Slot::Vacant { .. } => None,
        })
    }

    /// Free `scope` if nothing holds it, then retry its parent.
    fn try_free(&mut self, scope: ScopeId) {
        let mut current = Some(scope);
        while let Some(id) = current {
            let unused = id != ScopeId::ROOT
                && self
                    .scope(id)
                    .is_some_and(|s| !s.active && !s.captured && s.children == 0);
            if !unused {
                break;
            }
            current = self.vacate(id).and_then(|s| s.parent);
            if let Some(parent) = current.and_then(|p| self.scope_mut(p)) {
                parent.children = parent.children.saturating_sub(1);
            }
        }
    }

    /// Move a scope out of its slot and onto the free list.
    fn vacate(&mut self, id: ScopeId) -> Option<Scope> {
        let slot = self.slots.get_mut(id.index())?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        let Slot::Occupied(scope) = std::mem::replace(slot, vacant) else {
            return None;
        };
        self.free_head = Some(id);
        self.live -= 1;
        tracing::trace!(scope = id.0, "released scope");
        Some(scope)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
