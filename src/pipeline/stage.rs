//! Build stages and their dependency graph.
//!
//! Every stage declares which stages must complete before it starts.
//! The declared edges form a DAG; [`validate`] checks it once per build
//! so an ordering mistake fails loudly instead of producing a site built
//! from half-derived collections.

use anyhow::{Result, bail};

/// One phase of the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Walk the content tree and parse every page source.
    Scan,
    /// Derive collections (tag list, dated posts) from the scanned documents.
    Collect,
    /// Render pages through templates and write their artifacts.
    Render,
    /// Copy or minify static assets into the output tree.
    Assets,
    /// Emit site-wide artifacts (feed, sitemap).
    Generate,
}

impl Stage {
    /// Schedule order. Render and Assets are adjacent because the executor
    /// runs them concurrently; the graph check only requires that every
    /// stage appears after everything it requires.
    pub const ORDER: [Stage; 5] = [
        Stage::Scan,
        Stage::Collect,
        Stage::Render,
        Stage::Assets,
        Stage::Generate,
    ];

    /// Stages that must complete before this one starts.
    pub fn requires(self) -> &'static [Stage] {
        match self {
            Stage::Scan => &[],
            Stage::Collect => &[Stage::Scan],
            // Templates iterate the collections, so Render waits for Collect.
            Stage::Render => &[Stage::Collect],
            Stage::Assets => &[Stage::Scan],
            Stage::Generate => &[Stage::Render, Stage::Assets],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Scan => "scan",
            Stage::Collect => "collect",
            Stage::Render => "render",
            Stage::Assets => "assets",
            Stage::Generate => "generate",
        }
    }
}

/// Validate the declared stage graph against the schedule order.
pub fn validate() -> Result<()> {
    validate_graph(&Stage::ORDER, &|s| s.requires().to_vec())
}

/// Check that `requires` is acyclic and that `order` schedules every
/// requirement before its dependent.
fn validate_graph(order: &[Stage], requires: &dyn Fn(Stage) -> Vec<Stage>) -> Result<()> {
    if let Some(cycle) = find_cycle(order, requires) {
        let chain: Vec<&str> = cycle.iter().map(|s| s.name()).collect();
        bail!("stage graph has a cycle: {}", chain.join(" -> "));
    }

    for (i, &stage) in order.iter().enumerate() {
        for req in requires(stage) {
            match order.iter().position(|&s| s == req) {
                None => bail!(
                    "stage '{}' requires '{}', which is not scheduled",
                    stage.name(),
                    req.name()
                ),
                Some(j) if j >= i => bail!(
                    "stage '{}' is scheduled before its requirement '{}'",
                    stage.name(),
                    req.name()
                ),
                Some(_) => {}
            }
        }
    }

    Ok(())
}

/// Depth-first search over requirement edges. Returns the first cycle
/// found as the chain of stages that closes on itself.
fn find_cycle(stages: &[Stage], requires: &dyn Fn(Stage) -> Vec<Stage>) -> Option<Vec<Stage>> {
    fn visit(
        stage: Stage,
        requires: &dyn Fn(Stage) -> Vec<Stage>,
        path: &mut Vec<Stage>,
        done: &mut Vec<Stage>,
    ) -> Option<Vec<Stage>> {
        if done.contains(&stage) {
            return None;
        }
        if let Some(pos) = path.iter().position(|&s| s == stage) {
            let mut cycle = path[pos..].to_vec();
            cycle.push(stage);
            return Some(cycle);
        }

        path.push(stage);
        for req in requires(stage) {
            if let Some(cycle) = visit(req, requires, path, done) {
                return Some(cycle);
            }
        }
        path.pop();
        done.push(stage);
        None
    }

    let mut done = Vec::new();
    for &stage in stages {
        let mut path = Vec::new();
        if let Some(cycle) = visit(stage, requires, &mut path, &mut done) {
            return Some(cycle);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_graph_is_valid() {
        validate().unwrap();
    }

    #[test]
    fn test_order_lists_every_stage_once() {
        for &stage in &Stage::ORDER {
            assert_eq!(Stage::ORDER.iter().filter(|&&s| s == stage).count(), 1);
        }
    }

    #[test]
    fn test_order_respects_every_edge() {
        let pos = |stage| Stage::ORDER.iter().position(|&s| s == stage).unwrap();
        for &stage in &Stage::ORDER {
            for &req in stage.requires() {
                assert!(
                    pos(req) < pos(stage),
                    "{} scheduled before its requirement {}",
                    stage.name(),
                    req.name()
                );
            }
        }
    }

    #[test]
    fn test_collections_complete_before_render() {
        assert!(Stage::Render.requires().contains(&Stage::Collect));
        assert!(Stage::Collect.requires().contains(&Stage::Scan));
    }

    #[test]
    fn test_cycle_is_rejected() {
        // Scan and Generate requiring each other can never be scheduled.
        let broken = |s: Stage| match s {
            Stage::Scan => vec![Stage::Generate],
            Stage::Generate => vec![Stage::Scan],
            other => other.requires().to_vec(),
        };

        let err = validate_graph(&Stage::ORDER, &broken).unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_unscheduled_requirement_is_rejected() {
        let err = validate_graph(&Stage::ORDER[1..], &|s| s.requires().to_vec()).unwrap_err();
        assert!(err.to_string().contains("not scheduled"));
    }

    #[test]
    fn test_misordered_schedule_is_rejected() {
        let order = [
            Stage::Render,
            Stage::Collect,
            Stage::Scan,
            Stage::Assets,
            Stage::Generate,
        ];
        let err = validate_graph(&order, &|s| s.requires().to_vec()).unwrap_err();
        assert!(err.to_string().contains("before its requirement"));
    }
}
