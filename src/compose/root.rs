//! Composition root: drives the layers in their fixed dependency order.

use tracing::{debug, info};

use crate::config::{keys, ConfigResolver, DeployContext};
use crate::error::{CompositionError, Result};
use crate::graph::ResourceGraph;
use crate::store::ParameterSnapshot;

use super::api::ApiLayer;
use super::compute::ComputeProvisioner;
use super::domain::DomainBindingLayer;
use super::edge::EdgeCachingLayer;

/// Phases of one composition run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Nothing has happened yet.
    Idle,
    /// Context and origins resolved.
    ConfigResolved,
    /// Compute unit and alias declared.
    ComputeReady,
    /// REST entry point declared.
    ApiReady,
    /// Distribution and policies declared.
    EdgeReady,
    /// Public domain bound.
    DomainBound,
    /// Graph assembled.
    Done,
}

impl Phase {
    /// Returns the phase that legally follows this one.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::ConfigResolved),
            Self::ConfigResolved => Some(Self::ComputeReady),
            Self::ComputeReady => Some(Self::ApiReady),
            Self::ApiReady => Some(Self::EdgeReady),
            Self::EdgeReady => Some(Self::DomainBound),
            Self::DomainBound => Some(Self::Done),
            Self::Done => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::ConfigResolved => "config-resolved",
            Self::ComputeReady => "compute-ready",
            Self::ApiReady => "api-ready",
            Self::EdgeReady => "edge-ready",
            Self::DomainBound => "domain-bound",
            Self::Done => "done",
        };
        write!(f, "{name}")
    }
}

/// Tracks the current phase and rejects out-of-order transitions.
///
/// The root only ever advances one step at a time, so any skipped or
/// repeated transition is a driving bug, not a recoverable condition.
#[derive(Debug)]
pub struct PhaseMachine {
    current: Phase,
}

impl PhaseMachine {
    /// Creates a machine in the idle phase.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Phase::Idle,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn current(&self) -> Phase {
        self.current
    }

    /// Advances to `next`, which must be the immediate successor phase.
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::OutOfOrder` for any other transition.
    pub fn advance(&mut self, next: Phase) -> Result<()> {
        if self.current.next() == Some(next) {
            debug!("Phase {} -> {next}", self.current);
            self.current = next;
            Ok(())
        } else {
            Err(CompositionError::OutOfOrder {
                current: self.current.to_string(),
                attempted: next.to_string(),
            }
            .into())
        }
    }
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits the configured origin list on commas, preserving every part
/// verbatim. No trimming, no empty-part filtering: the stored value is
/// authoritative and malformed entries should surface downstream rather
/// than be papered over here.
#[must_use]
pub fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',').map(String::from).collect()
}

/// Drives one all-or-nothing composition run.
///
/// Consumes itself on `compose`: a root cannot be reused, which keeps every
/// run independent and every graph traceable to exactly one snapshot.
#[derive(Debug)]
pub struct CompositionRoot {
    /// Context the run is composed for.
    context: DeployContext,
    /// Point-in-time parameter capture the run resolves against.
    snapshot: ParameterSnapshot,
}

impl CompositionRoot {
    /// Creates a root over a context and snapshot.
    #[must_use]
    pub const fn new(context: DeployContext, snapshot: ParameterSnapshot) -> Self {
        Self { context, snapshot }
    }

    /// Composes the full resource graph, or nothing.
    ///
    /// # Errors
    ///
    /// The first unresolvable parameter or violated invariant aborts the run;
    /// no partial graph is ever returned.
    pub fn compose(self) -> Result<ResourceGraph> {
        let mut phase = PhaseMachine::new();
        let resolver = ConfigResolver::new(&self.context.environment, &self.snapshot);
        info!(
            "Composing resource graph for environment '{}' in {} ({})",
            self.context.environment, self.context.region, self.context.account
        );

        let origins = split_origins(&resolver.resolve_string(keys::CORS_ALLOW_ORIGINS)?);
        phase.advance(Phase::ConfigResolved)?;

        let compute = ComputeProvisioner::new(&resolver).provision()?;
        phase.advance(Phase::ComputeReady)?;

        let api = ApiLayer::new(&resolver).expose(&compute, &origins)?;
        phase.advance(Phase::ApiReady)?;

        let edge = EdgeCachingLayer::new(&resolver).front(&api, &origins, &self.context.region)?;
        phase.advance(Phase::EdgeReady)?;

        let dns = DomainBindingLayer::new(&resolver).bind(&edge.distribution)?;
        phase.advance(Phase::DomainBound)?;

        let graph = ResourceGraph {
            context: self.context,
            compute,
            api,
            edge,
            dns,
        };
        phase.advance(Phase::Done)?;

        info!(
            "Composition complete: {} resources declared",
            graph.resource_count()
        );
        Ok(graph)
    }
}
