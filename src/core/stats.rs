//! Summary statistics for a generated network

use std::fmt;

use serde::Serialize;

use crate::core::connectivity::ConnectivityReport;
use crate::core::models::Network;

/// Minimum, maximum and mean edge length in parsecs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Figures reported after generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStatistics {
    pub jump_distance: f64,
    pub system_count: usize,
    pub edge_count: usize,
    pub multi_star_count: usize,
    /// Mean edges per system (2E / N); zero for an empty network
    pub mean_degree: f64,
    /// Absent when the network has no edges
    pub distances: Option<DistanceSummary>,
    pub connectivity: ConnectivityReport,
}

impl NetworkStatistics {
    pub fn from_network(network: &Network) -> Self {
        let system_count = network.systems.len();
        let edge_count = network.edges.len();

        let mean_degree = if system_count == 0 {
            0.0
        } else {
            (edge_count * 2) as f64 / system_count as f64
        };

        let distances = (edge_count > 0).then(|| {
            let (min, max, sum) = network.edges.iter().fold(
                (f64::INFINITY, f64::NEG_INFINITY, 0.0),
                |(min, max, sum), e| (min.min(e.distance), max.max(e.distance), sum + e.distance),
            );
            DistanceSummary {
                min,
                max,
                mean: sum / edge_count as f64,
            }
        });

        Self {
            jump_distance: network.jump_distance,
            system_count,
            edge_count,
            multi_star_count: network.multi_star_count(),
            mean_degree,
            distances,
            connectivity: network.connectivity(),
        }
    }
}

impl fmt::Display for NetworkStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network statistics:")?;
        writeln!(f, "  Jump distance:      {} pc", self.jump_distance)?;
        writeln!(f, "  Star systems:       {}", self.system_count)?;
        writeln!(f, "  Connections:        {}", self.edge_count)?;
        writeln!(
            f,
            "  Connected:          {}",
            if self.connectivity.connected { "yes" } else { "no" }
        )?;
        if !self.connectivity.connected {
            writeln!(f, "  Components:         {}", self.connectivity.component_count)?;
        }
        writeln!(f, "  Multi-star systems: {}", self.multi_star_count)?;
        if self.system_count > 0 {
            writeln!(f, "  Mean connections:   {:.2}", self.mean_degree)?;
        }
        if let Some(d) = &self.distances {
            writeln!(
                f,
                "  Connection length:  min {:.2} pc, max {:.2} pc, mean {:.2} pc",
                d.min, d.max, d.mean
            )?;
        }
        Ok(())
    }
}
