mod forces;

use eframe::egui::{Vec2, vec2};
use log::debug;

use forces::{
    Jiggle, LinkParams, apply_center_force, apply_link_force, apply_many_body_force, integrate,
    link_params,
};

const ALPHA_MIN: f32 = 0.001;
const VELOCITY_DECAY: f32 = 0.4;
const LINK_DISTANCE: f32 = 30.0;
const DISTANCE_MIN_SQ: f32 = 1.0;
const COOLING_TICKS: f32 = 300.0;

pub(in crate::app) const DRAG_ALPHA_TARGET: f32 = 0.3;

pub(in crate::app) struct SimNode {
    pub(in crate::app) id: String,
    pub(in crate::app) pos: Vec2,
    pub(in crate::app) velocity: Vec2,
    pub(in crate::app) fx: Option<f32>,
    pub(in crate::app) fy: Option<f32>,
}

impl SimNode {
    pub(in crate::app) fn at_origin(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pos: Vec2::ZERO,
            velocity: Vec2::ZERO,
            fx: None,
            fy: None,
        }
    }

    pub(in crate::app) fn pin(&mut self, at: Vec2) {
        self.fx = Some(at.x);
        self.fy = Some(at.y);
    }

    pub(in crate::app) fn unpin(&mut self) {
        self.fx = None;
        self.fy = None;
    }

    pub(in crate::app) fn is_pinned(&self) -> bool {
        self.fx.is_some() || self.fy.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct SimLink {
    pub(in crate::app) source: usize,
    pub(in crate::app) target: usize,
    pub(in crate::app) amount: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct SimulationConfig {
    pub(in crate::app) center: Vec2,
    pub(in crate::app) charge: f32,
    pub(in crate::app) link_distance: f32,
    pub(in crate::app) alpha_min: f32,
    pub(in crate::app) alpha_decay: f32,
    pub(in crate::app) velocity_decay: f32,
}

impl SimulationConfig {
    pub(in crate::app) fn for_canvas(size: Vec2, charge: f32) -> Self {
        Self {
            center: vec2(size.x / 2.0, size.y / 2.0),
            charge,
            link_distance: LINK_DISTANCE,
            alpha_min: ALPHA_MIN,
            alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / COOLING_TICKS),
            velocity_decay: VELOCITY_DECAY,
        }
    }
}

pub(in crate::app) trait TickListener {
    fn on_tick(&mut self, nodes: &[SimNode], links: &[SimLink]);
}

pub(in crate::app) struct Simulation {
    nodes: Vec<SimNode>,
    links: Vec<SimLink>,
    link_params: Vec<LinkParams>,
    config: SimulationConfig,
    alpha: f32,
    alpha_target: f32,
    running: bool,
    jiggle: Jiggle,
    positions_scratch: Vec<Vec2>,
}

impl Simulation {
    pub(in crate::app) fn new(
        nodes: Vec<SimNode>,
        links: Vec<SimLink>,
        config: SimulationConfig,
    ) -> Self {
        let link_params = link_params(nodes.len(), &links);
        Self {
            nodes,
            links,
            link_params,
            config,
            alpha: 1.0,
            alpha_target: 0.0,
            running: true,
            jiggle: Jiggle::new(),
            positions_scratch: Vec::new(),
        }
    }

    pub(in crate::app) fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    pub(in crate::app) fn links(&self) -> &[SimLink] {
        &self.links
    }

    pub(in crate::app) fn node_mut(&mut self, index: usize) -> Option<&mut SimNode> {
        self.nodes.get_mut(index)
    }

    pub(in crate::app) fn alpha(&self) -> f32 {
        self.alpha
    }

    pub(in crate::app) fn is_running(&self) -> bool {
        self.running
    }

    pub(in crate::app) fn reheat(&mut self, alpha_target: f32) {
        self.alpha_target = alpha_target;
        if !self.running {
            debug!("simulation restarted at alpha {:.3}", self.alpha);
        }
        self.running = true;
    }

    pub(in crate::app) fn restart(&mut self) {
        self.alpha = 1.0;
        self.running = true;
    }

    pub(in crate::app) fn cool(&mut self) {
        self.alpha_target = 0.0;
    }

    pub(in crate::app) fn stop(&mut self) {
        self.running = false;
    }

    /// Advances one tick and notifies `listener`. Returns whether another
    /// step should be scheduled.
    pub(in crate::app) fn step(&mut self, listener: &mut dyn TickListener) -> bool {
        if !self.running {
            return false;
        }

        self.tick();
        listener.on_tick(&self.nodes, &self.links);

        if self.alpha < self.config.alpha_min {
            self.running = false;
            debug!("simulation settled after cooling below alpha_min");
        }
        self.running
    }

    fn tick(&mut self) {
        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

        apply_link_force(
            &mut self.nodes,
            &self.links,
            &self.link_params,
            self.config.link_distance,
            self.alpha,
            &mut self.jiggle,
        );
        apply_many_body_force(
            &mut self.nodes,
            &mut self.positions_scratch,
            self.config.charge,
            DISTANCE_MIN_SQ,
            self.alpha,
            &mut self.jiggle,
        );
        apply_center_force(&mut self.nodes, self.config.center);
        integrate(&mut self.nodes, self.config.velocity_decay);
    }
}
