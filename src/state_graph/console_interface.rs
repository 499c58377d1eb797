use std::io;
use std::time::{Duration, Instant};

use log::info;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::*;

use crate::core::{GridWorld, WinnableState, is_winnable};
use crate::state_graph::StateGraph;

pub struct GraphRenderState<'a> {
    pub graph: &'a StateGraph,
    pub world: &'a GridWorld,
    pub processed_since_last_render: usize,
    pub start_time: Instant,
    pub last_render_time: Instant,
    pub current_time: Instant,
}

impl GraphRenderState<'_> {
    fn throughput_line(&self, visited: usize) -> String {
        let since_last = self.current_time - self.last_render_time;
        let since_start = self.current_time - self.start_time;
        format!(
            "{} states expanded in the last {:?}: {:.1}/s now, {:.1}/s overall",
            self.processed_since_last_render,
            since_last,
            per_second(self.processed_since_last_render, since_last),
            per_second(visited, since_start)
        )
    }
}

fn per_second(count: usize, elapsed: Duration) -> f64 {
    if elapsed.is_zero() {
        0.0
    } else {
        count as f64 / elapsed.as_secs_f64()
    }
}

pub fn render_graph(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    render: GraphRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    let graph_info = GraphInfo::new(render.graph, render.world);
    info!("{}", graph_info.to_log_string());

    let summary = graph_info.to_human_string();
    let throughput = render.throughput_line(graph_info.visited);

    terminal.draw(|f| {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        let summary_paragraph = Paragraph::new(summary)
            .block(Block::default().borders(Borders::ALL).title("State Graph"))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(summary_paragraph, rows[0]);

        let throughput_paragraph = Paragraph::new(throughput)
            .block(Block::default().borders(Borders::ALL).title("Throughput"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(throughput_paragraph, rows[1]);
    })?;
    Ok(())
}

/// Counts describing an explored (possibly partial) state graph.
pub struct GraphInfo {
    pub nodes: usize,
    pub edges: usize,
    pub visited: usize,
    pub won: usize,
    /// States the dead-state check already rules out.
    pub dead: usize,
    /// States in which at least one crate has broken.
    pub with_breakage: usize,
}

impl GraphInfo {
    pub fn new(graph: &StateGraph, world: &GridWorld) -> Self {
        let mut won = 0;
        let mut dead = 0;
        let mut with_breakage = 0;
        for state in graph.states.values() {
            if world.is_won(state) {
                won += 1;
            } else if is_winnable(world, state) == WinnableState::WinImpossible {
                dead += 1;
            }
            if state.destroyed_count() > 0 {
                with_breakage += 1;
            }
        }

        GraphInfo {
            nodes: graph.nodes.len(),
            edges: graph.edges.len(),
            visited: graph.nodes.len() - graph.unvisited.len(),
            won,
            dead,
            with_breakage,
        }
    }

    pub fn percent_visited(&self) -> f64 {
        if self.nodes == 0 {
            0.0
        } else {
            self.visited as f64 * 100.0 / self.nodes as f64
        }
    }

    pub fn to_human_string(&self) -> String {
        format!(
            "{} states ({} expanded, {:.1}%), {} moves between them.\n\
             {} won, {} dead, {} with broken crates.",
            self.nodes,
            self.visited,
            self.percent_visited(),
            self.edges,
            self.won,
            self.dead,
            self.with_breakage
        )
    }

    pub fn to_log_string(&self) -> String {
        format!(
            "nodes={} edges={} visited={} won={} dead={} broken={}",
            self.nodes, self.edges, self.visited, self.won, self.dead, self.with_breakage
        )
    }
}

pub fn get_graph_info(graph: &StateGraph, world: &GridWorld) -> String {
    GraphInfo::new(graph, world).to_human_string()
}
