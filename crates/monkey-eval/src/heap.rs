//! Heap - object registry and mark-and-sweep collection.
//!
//! Closures and the environments that store them form reference cycles
//! (`let f = fn() { f() };` binds `f` in the very environment the closure
//! captured), so heap entities cannot be reference-counted without weak
//! back-links the object model does not have. Instead, every
//! heap-allocated entity is registered here and reclaimed by tracing:
//!
//! 1. Mark everything transitively reachable from the given roots
//!    (environment → bound values → function → captured environment,
//!    return cell → inner value).
//! 2. Sweep every registered slot the trace did not reach, dropping its
//!    resources.
//!
//! Collection is stop-the-world and runs at statement boundaries only;
//! nothing allocated in the middle of an expression is ever collected
//! while that expression still runs.
//!
//! Slots live in one arena per entity kind, with free lists for reuse.
//! A handle (`EnvRef`, `FunRef`, `CellRef`) is a stable address into its
//! arena: slot indices are never shifted, only vacated and refilled.
//! Dropping the heap frees every still-registered slot.

use crate::env::Environment;
use crate::object::{FunctionObject, Object};

/// Handle to a heap-allocated environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvRef(u32);

/// Handle to a heap-allocated function object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunRef(u32);

/// Handle to a heap-allocated object cell (a `Return` payload).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef(u32);

impl EnvRef {
    #[cfg(test)]
    pub(crate) fn testing(index: u32) -> Self {
        EnvRef(index)
    }
}

/// A root for a collection pass.
#[derive(Debug, Clone, Copy)]
pub enum GcRoot {
    /// An environment and everything reachable through it.
    Env(EnvRef),

    /// A loose value (the pending result of the statement that just ran).
    Value(Object),
}

/// Counters describing collector activity over the heap's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GcStats {
    /// Collection passes run.
    pub collections: u64,

    /// Environments swept.
    pub envs_freed: u64,

    /// Function objects swept.
    pub functions_freed: u64,

    /// Return cells swept.
    pub cells_freed: u64,
}

/// The evaluator's heap: slot arenas plus the collector that sweeps them.
#[derive(Debug, Default)]
pub struct Heap {
    envs: Vec<Option<Environment>>,
    env_free: Vec<u32>,

    funs: Vec<Option<FunctionObject>>,
    fun_free: Vec<u32>,

    cells: Vec<Option<Object>>,
    cell_free: Vec<u32>,

    stats: GcStats,
}

impl Heap {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // ALLOCATION
    // =========================================================================

    /// Registers a new environment and returns its handle.
    pub fn alloc_env(&mut self, env: Environment) -> EnvRef {
        EnvRef(alloc_slot(&mut self.envs, &mut self.env_free, env))
    }

    /// Registers a new function object and returns its handle.
    pub fn alloc_fun(&mut self, fun: FunctionObject) -> FunRef {
        FunRef(alloc_slot(&mut self.funs, &mut self.fun_free, fun))
    }

    /// Registers a new object cell and returns its handle.
    pub fn alloc_cell(&mut self, value: Object) -> CellRef {
        CellRef(alloc_slot(&mut self.cells, &mut self.cell_free, value))
    }

    // =========================================================================
    // ACCESS
    // =========================================================================

    /// Returns the environment behind `env`.
    ///
    /// # Panics
    ///
    /// Panics if the slot was swept; handles must not outlive the roots
    /// that keep them alive.
    pub fn env(&self, env: EnvRef) -> &Environment {
        self.envs[env.0 as usize]
            .as_ref()
            .expect("dangling environment handle")
    }

    fn env_mut(&mut self, env: EnvRef) -> &mut Environment {
        self.envs[env.0 as usize]
            .as_mut()
            .expect("dangling environment handle")
    }

    /// Returns the function object behind `fun`.
    pub fn fun(&self, fun: FunRef) -> &FunctionObject {
        self.funs[fun.0 as usize]
            .as_ref()
            .expect("dangling function handle")
    }

    /// Returns a copy of the value stored in `cell`.
    pub fn cell_value(&self, cell: CellRef) -> Object {
        self.cells[cell.0 as usize].expect("dangling cell handle")
    }

    /// Looks up `name` starting at `env` and walking the outer chain.
    pub fn get_binding(&self, env: EnvRef, name: &str) -> Option<Object> {
        let mut current = Some(env);
        while let Some(handle) = current {
            let scope = self.env(handle);
            if let Some(value) = scope.get(name) {
                return Some(value);
            }
            current = scope.outer();
        }
        None
    }

    /// Binds `name` in `env`'s local scope only.
    pub fn set_binding(&mut self, env: EnvRef, name: &str, value: Object) {
        self.env_mut(env).insert(name, value);
    }

    // =========================================================================
    // COLLECTION
    // =========================================================================

    /// Runs a full mark-and-sweep pass over the registry.
    ///
    /// Everything transitively reachable from `roots` survives; every
    /// other registered slot is dropped and its index returned to the
    /// free list. Cycles between closures and their captured environments
    /// need no special handling: an unreachable cycle is simply never
    /// marked.
    pub fn collect(&mut self, roots: &[GcRoot]) {
        let mut env_marks = MarkBitmap::for_slots(self.envs.len());
        let mut fun_marks = MarkBitmap::for_slots(self.funs.len());
        let mut cell_marks = MarkBitmap::for_slots(self.cells.len());

        // Mark phase: depth-first over an explicit worklist.
        let mut worklist: Vec<GcRoot> = roots.to_vec();
        while let Some(item) = worklist.pop() {
            match item {
                GcRoot::Env(env) => {
                    if !env_marks.mark(env.0) {
                        continue;
                    }
                    let scope = self.env(env);
                    if let Some(outer) = scope.outer() {
                        worklist.push(GcRoot::Env(outer));
                    }
                    for value in scope.values() {
                        worklist.push(GcRoot::Value(*value));
                    }
                },
                GcRoot::Value(Object::Return(cell)) => {
                    if cell_marks.mark(cell.0) {
                        worklist.push(GcRoot::Value(self.cell_value(cell)));
                    }
                },
                GcRoot::Value(Object::Function(fun)) => {
                    if fun_marks.mark(fun.0) {
                        worklist.push(GcRoot::Env(self.fun(fun).env));
                    }
                },
                GcRoot::Value(_) => {},
            }
        }

        // Sweep phase: drop every registered slot the trace missed.
        let envs_freed = sweep_arena(&mut self.envs, &mut self.env_free, &env_marks);
        let funs_freed = sweep_arena(&mut self.funs, &mut self.fun_free, &fun_marks);
        let cells_freed = sweep_arena(&mut self.cells, &mut self.cell_free, &cell_marks);

        self.stats.collections += 1;
        self.stats.envs_freed += envs_freed as u64;
        self.stats.functions_freed += funs_freed as u64;
        self.stats.cells_freed += cells_freed as u64;

        log::debug!(
            "gc cycle {}: freed {} envs, {} functions, {} cells; live {}/{}/{}",
            self.stats.collections,
            envs_freed,
            funs_freed,
            cells_freed,
            self.live_envs(),
            self.live_funs(),
            self.live_cells(),
        );
    }

    /// Number of registered environments.
    pub fn live_envs(&self) -> usize {
        self.envs.len() - self.env_free.len()
    }

    /// Number of registered function objects.
    pub fn live_funs(&self) -> usize {
        self.funs.len() - self.fun_free.len()
    }

    /// Number of registered object cells.
    pub fn live_cells(&self) -> usize {
        self.cells.len() - self.cell_free.len()
    }

    /// Collector activity counters.
    pub fn stats(&self) -> GcStats {
        self.stats
    }
}

/// Stores `value` in a vacant slot, reusing a freed index when possible.
fn alloc_slot<T>(arena: &mut Vec<Option<T>>, free: &mut Vec<u32>, value: T) -> u32 {
    match free.pop() {
        Some(index) => {
            debug_assert!(arena[index as usize].is_none());
            arena[index as usize] = Some(value);
            index
        },
        None => {
            arena.push(Some(value));
            (arena.len() - 1) as u32
        },
    }
}

/// Drops every occupied slot the mark pass missed; returns how many.
fn sweep_arena<T>(arena: &mut Vec<Option<T>>, free: &mut Vec<u32>, marks: &MarkBitmap) -> usize {
    let mut freed = 0;
    for (index, slot) in arena.iter_mut().enumerate() {
        if slot.is_some() && !marks.is_marked(index as u32) {
            *slot = None;
            free.push(index as u32);
            freed += 1;
        }
    }
    freed
}

/// Word-packed mark bitmap, one bit per arena slot.
struct MarkBitmap {
    bits: Vec<u64>,
}

impl MarkBitmap {
    fn for_slots(slots: usize) -> Self {
        Self {
            bits: vec![0; slots.div_ceil(64)],
        }
    }

    /// Sets the bit for `index`; returns true if it was newly set.
    fn mark(&mut self, index: u32) -> bool {
        let word = (index / 64) as usize;
        let bit = 1u64 << (index % 64);
        let newly = self.bits[word] & bit == 0;
        self.bits[word] |= bit;
        newly
    }

    fn is_marked(&self, index: u32) -> bool {
        let word = (index / 64) as usize;
        self.bits[word] & (1u64 << (index % 64)) != 0
    }
}
