//! Fixed worker-pool parallel search, grounded on
//! `include/parallel/ParallelMatchingEngine.hpp`'s global-stack design:
//! each worker pulls a state, expands it by one level (`NextPair`/
//! `IsFeasiblePair`), and redistributes the feasible children between its
//! own local stack and the shared global one.

use std::sync::atomic::{AtomicBool, AtomicIsize, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::graph::NIL;
use crate::state::MatchingState;

use super::stack::{GlobalStack, LockFreeStack, SynchronizedStack};
use super::{Solution, Tracer, ROOT_PARENT};

/// A frontier entry: a state together with its trace row id, if tracing is
/// enabled. Carried alongside the state itself (rather than kept in
/// thread-local context) since a state can cross from one worker's local
/// stack to the global one and be picked up by any other worker.
type Frame<'a, N, EP, ET> = (MatchingState<'a, N, EP, ET>, Option<u64>);

/// Which global-stack backing to use (`-k` in the CLI selects `LockFree`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackKind {
    Synchronized,
    LockFree,
}

/// Tuning knobs for [`parallel_find_all`], mirroring
/// `ParallelMatchingEngine`'s constructor parameters and the `-t`/`-c`/
/// `-h`/`-l`/`-k` CLI flags.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    pub num_threads: usize,
    /// First CPU to pin worker 0 to; subsequent workers take consecutive
    /// ids. `None` disables affinity pinning.
    pub first_cpu: Option<usize>,
    /// Depth at or below which a newly created child goes to the global
    /// stack rather than the worker's local one.
    pub g_limit: u32,
    /// Local-stack size above which further children overflow to global.
    pub l_limit: usize,
    pub stack_kind: StackKind,
    pub store_solutions: bool,
}

impl ParallelConfig {
    pub fn new(num_threads: usize, pattern_node_count: u32) -> Self {
        ParallelConfig {
            num_threads: num_threads.max(1),
            first_cpu: None,
            g_limit: 3,
            l_limit: pattern_node_count as usize,
            stack_kind: StackKind::Synchronized,
            store_solutions: true,
        }
    }
}

/// Runs the parallel search to exhaustion (the parallel engine has no
/// "stop after first solution" mode — see spec's documented cancellation
/// behavior). Returns the solution count and, if `config.store_solutions`,
/// every solution found.
///
/// `on_first_solution` is invoked at most once, the instant any worker
/// reaches the first goal state (a compare-and-set-once flag, matching
/// `ParallelMatchingEngine::once`). `tracer`, when present, records one row
/// per state visited by any worker (see [`crate::trace::StateTracer`],
/// behind the `trace` feature); access is serialized through the `Mutex`
/// since workers record concurrently.
pub fn parallel_find_all<N, EP, ET, NE, EE>(
    initial: MatchingState<'_, N, EP, ET>,
    node_eq: &NE,
    edge_eq: &EE,
    config: &ParallelConfig,
    on_first_solution: Option<&(dyn Fn() + Sync)>,
    tracer: Option<&Mutex<dyn Tracer + Send>>,
) -> (usize, Vec<Solution>)
where
    N: Eq + Sync,
    EP: Eq + Sync,
    ET: Eq + Sync,
    NE: Fn(&N, &N) -> bool + Sync,
    EE: Fn(&EP, &ET) -> bool + Sync,
{
    let global: Box<dyn GlobalStack<Frame<'_, N, EP, ET>>> = match config.stack_kind {
        StackKind::Synchronized => Box::new(SynchronizedStack::default()),
        StackKind::LockFree => Box::new(LockFreeStack::default()),
    };

    let in_flight = AtomicIsize::new(1);
    let solution_count = AtomicUsize::new(0);
    let once = AtomicBool::new(false);
    let solutions: Mutex<Vec<Solution>> = Mutex::new(Vec::new());

    let root_id = tracer.map(|t| t.lock().unwrap().enter(ROOT_PARENT, initial.depth()));
    global.push((initial, root_id));

    std::thread::scope(|scope| {
        for worker_id in 0..config.num_threads {
            let global = global.as_ref();
            let in_flight = &in_flight;
            let solution_count = &solution_count;
            let once = &once;
            let solutions = &solutions;
            scope.spawn(move || {
                #[cfg(unix)]
                if let Some(first_cpu) = config.first_cpu {
                    set_cpu_affinity(first_cpu + worker_id);
                }
                run_worker(
                    global,
                    config,
                    in_flight,
                    solution_count,
                    once,
                    solutions,
                    node_eq,
                    edge_eq,
                    on_first_solution,
                    tracer,
                );
            });
        }
    });

    let solutions = solutions.into_inner().unwrap_or_default();
    (solution_count.load(Ordering::Acquire), solutions)
}

#[allow(clippy::too_many_arguments)]
fn run_worker<'a, N, EP, ET, NE, EE>(
    global: &dyn GlobalStack<Frame<'a, N, EP, ET>>,
    config: &ParallelConfig,
    in_flight: &AtomicIsize,
    solution_count: &AtomicUsize,
    once: &AtomicBool,
    solutions: &Mutex<Vec<Solution>>,
    node_eq: &NE,
    edge_eq: &EE,
    on_first_solution: Option<&(dyn Fn() + Sync)>,
    tracer: Option<&Mutex<dyn Tracer + Send>>,
) where
    N: Eq,
    EP: Eq,
    ET: Eq,
    NE: Fn(&N, &N) -> bool,
    EE: Fn(&EP, &ET) -> bool,
{
    let mut local: Vec<Frame<'a, N, EP, ET>> = Vec::new();

    loop {
        let frame = local.pop().or_else(|| global.pop());
        let Some((mut state, id)) = frame else {
            if in_flight.load(Ordering::Acquire) <= 0 {
                return;
            }
            std::thread::yield_now();
            continue;
        };

        process_state(
            &mut state,
            id,
            config,
            &mut local,
            global,
            in_flight,
            solution_count,
            once,
            solutions,
            node_eq,
            edge_eq,
            on_first_solution,
            tracer,
        );
        in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}

#[allow(clippy::too_many_arguments)]
fn process_state<'a, N, EP, ET, NE, EE>(
    state: &mut MatchingState<'a, N, EP, ET>,
    id: Option<u64>,
    config: &ParallelConfig,
    local: &mut Vec<Frame<'a, N, EP, ET>>,
    global: &dyn GlobalStack<Frame<'a, N, EP, ET>>,
    in_flight: &AtomicIsize,
    solution_count: &AtomicUsize,
    once: &AtomicBool,
    solutions: &Mutex<Vec<Solution>>,
    node_eq: &NE,
    edge_eq: &EE,
    on_first_solution: Option<&(dyn Fn() + Sync)>,
    tracer: Option<&Mutex<dyn Tracer + Send>>,
) where
    N: Eq,
    EP: Eq,
    ET: Eq,
    NE: Fn(&N, &N) -> bool,
    EE: Fn(&EP, &ET) -> bool,
{
    if state.is_goal() {
        if let (Some(t), Some(id)) = (tracer, id) {
            t.lock().unwrap().goal(id);
        }
        if !once.swap(true, Ordering::AcqRel) {
            if let Some(cb) = on_first_solution {
                cb();
            }
        }
        solution_count.fetch_add(1, Ordering::AcqRel);
        if config.store_solutions {
            solutions.lock().unwrap().push(state.mapping());
        }
        return;
    }

    if state.is_dead() {
        return;
    }

    let mut prev = NIL;
    while let Some(u) = state.next_pair(prev) {
        prev = u;
        let v = state.sigma_at_current_depth();
        if let (Some(t), Some(id)) = (tracer, id) {
            t.lock().unwrap().candidate_seen(id);
        }
        if state.is_feasible(v, u, node_eq, edge_eq) {
            let mut child = state.clone();
            child.add_pair(v, u);
            let child_id = match (tracer, id) {
                (Some(t), Some(id)) => Some(t.lock().unwrap().enter(id, child.depth())),
                _ => None,
            };
            in_flight.fetch_add(1, Ordering::AcqRel);
            if child.depth() <= config.g_limit || local.len() >= config.l_limit {
                global.push((child, child_id));
            } else {
                local.push((child, child_id));
            }
        }
    }
}

#[cfg(unix)]
fn set_cpu_affinity(cpu: usize) {
    use std::mem::MaybeUninit;

    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed().assume_init();
        libc::CPU_ZERO(&mut set);
        libc::CPU_SET(cpu, &mut set);
        libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set);
    }
}
