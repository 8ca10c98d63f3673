//! Structural queries over the task dependency graph.
//!
//! Edges point from a dependent task to the task it waits on. Ids that name
//! no task are ignored by every traversal.

use std::collections::HashSet;

use tracing::trace;

use crate::model::TaskMap;

/// The ids `task_id` depends on, exactly as stored. Empty for unknown tasks.
pub fn direct_dependencies<'a>(task_id: &str, tasks: &'a TaskMap) -> &'a [String] {
    tasks
        .get(task_id)
        .map(|t| t.dependencies.as_slice())
        .unwrap_or(&[])
}

/// Every task that lists `task_id` among its dependencies, in id order.
pub fn direct_dependents<'a>(task_id: &str, tasks: &'a TaskMap) -> Vec<&'a str> {
    tasks
        .values()
        .filter(|t| t.dependencies.iter().any(|d| d == task_id))
        .map(|t| t.id.as_str())
        .collect()
}

/// Whether making `task_id` depend on `candidate` would close a cycle.
///
/// True when the two ids are equal or when `task_id` is already reachable
/// from `candidate` through existing dependencies. Terminates on graphs that
/// already contain cycles elsewhere.
pub fn has_cycle<'a>(task_id: &str, candidate: &'a str, tasks: &'a TaskMap) -> bool {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = vec![candidate];

    while let Some(id) = stack.pop() {
        if id == task_id {
            return true;
        }
        if !visited.insert(id) {
            continue;
        }
        stack.extend(
            direct_dependencies(id, tasks)
                .iter()
                .rev()
                .map(String::as_str),
        );
    }
    false
}

/// Everything `task_id` transitively depends on, predecessors first and
/// `task_id` last.
///
/// Cycles do not fail the traversal: an edge back into a task that is
/// still being expanded is skipped, so the ordering is only guaranteed for
/// the acyclic part of the graph. Dependencies on unknown ids are left out.
pub fn dependency_chain(task_id: &str, tasks: &TaskMap) -> Vec<String> {
    let mut chain = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<(&str, usize)> = vec![(task_id, 0)];
    visited.insert(task_id);

    while let Some(&(id, next)) = stack.last() {
        let Some(dep) = direct_dependencies(id, tasks).get(next) else {
            chain.push(id.to_string());
            stack.pop();
            continue;
        };
        if let Some(top) = stack.last_mut() {
            top.1 += 1;
        }

        let dep = dep.as_str();
        if !tasks.contains_key(dep) {
            continue;
        }
        if visited.insert(dep) {
            stack.push((dep, 0));
        } else if stack.iter().any(|(open, _)| *open == dep) {
            trace!(from = %id, to = %dep, "cycle edge skipped in dependency chain");
        }
    }
    chain
}
