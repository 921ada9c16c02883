use eframe::egui::{Vec2, vec2};

use super::{SimLink, SimNode};

const JIGGLE_SCALE: f32 = 1e-6;

pub(super) struct Jiggle {
    state: u32,
}

impl Jiggle {
    pub(super) fn new() -> Self {
        Self { state: 1 }
    }

    fn next(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let unit = f64::from(self.state) / 4_294_967_296.0;
        (unit as f32 - 0.5) * JIGGLE_SCALE
    }

    fn nonzero(&mut self, value: f32) -> f32 {
        if value == 0.0 { self.next() } else { value }
    }
}

#[derive(Clone, Copy, Debug)]
pub(super) struct LinkParams {
    pub(super) strength: f32,
    pub(super) bias: f32,
}

pub(super) fn link_params(node_count: usize, links: &[SimLink]) -> Vec<LinkParams> {
    let mut degree = vec![0usize; node_count];
    for link in links {
        if link.source < node_count && link.target < node_count {
            degree[link.source] += 1;
            degree[link.target] += 1;
        }
    }

    links
        .iter()
        .map(|link| {
            let source = degree.get(link.source).copied().unwrap_or(1).max(1) as f32;
            let target = degree.get(link.target).copied().unwrap_or(1).max(1) as f32;
            LinkParams {
                strength: 1.0 / source.min(target),
                bias: source / (source + target),
            }
        })
        .collect()
}

pub(super) fn apply_link_force(
    nodes: &mut [SimNode],
    links: &[SimLink],
    params: &[LinkParams],
    distance: f32,
    alpha: f32,
    jiggle: &mut Jiggle,
) {
    let node_count = nodes.len();
    for (link, param) in links.iter().zip(params) {
        let (from, to) = (link.source, link.target);
        if from >= node_count || to >= node_count || from == to {
            continue;
        }

        let source_next = nodes[from].pos + nodes[from].velocity;
        let target_next = nodes[to].pos + nodes[to].velocity;
        let mut delta = target_next - source_next;
        delta.x = jiggle.nonzero(delta.x);
        delta.y = jiggle.nonzero(delta.y);

        let length = delta.length();
        let correction = delta * ((length - distance) / length * alpha * param.strength);

        nodes[to].velocity -= correction * param.bias;
        nodes[from].velocity += correction * (1.0 - param.bias);
    }
}

pub(super) fn apply_many_body_force(
    nodes: &mut [SimNode],
    positions: &mut Vec<Vec2>,
    strength: f32,
    distance_min_sq: f32,
    alpha: f32,
    jiggle: &mut Jiggle,
) {
    positions.clear();
    positions.extend(nodes.iter().map(|node| node.pos));

    for (index, node) in nodes.iter_mut().enumerate() {
        let point = positions[index];
        for (other_index, other) in positions.iter().enumerate() {
            if other_index == index {
                continue;
            }

            let mut delta = *other - point;
            delta.x = jiggle.nonzero(delta.x);
            delta.y = jiggle.nonzero(delta.y);

            let mut distance_sq = delta.length_sq();
            if distance_sq < distance_min_sq {
                distance_sq = (distance_min_sq * distance_sq).sqrt();
            }

            node.velocity += delta * (strength * alpha / distance_sq);
        }
    }
}

pub(super) fn apply_center_force(nodes: &mut [SimNode], center: Vec2) {
    if nodes.is_empty() {
        return;
    }

    let mut centroid = Vec2::ZERO;
    for node in nodes.iter() {
        centroid += node.pos;
    }
    centroid /= nodes.len() as f32;

    let shift = centroid - center;
    if shift.length_sq() <= f32::EPSILON {
        return;
    }
    for node in nodes.iter_mut() {
        node.pos -= shift;
    }
}

pub(super) fn integrate(nodes: &mut [SimNode], velocity_decay: f32) {
    let keep = 1.0 - velocity_decay;
    for node in nodes {
        match node.fx {
            Some(fx) => {
                node.pos.x = fx;
                node.velocity.x = 0.0;
            }
            None => {
                node.velocity.x *= keep;
                node.pos.x += node.velocity.x;
            }
        }
        match node.fy {
            Some(fy) => {
                node.pos.y = fy;
                node.velocity.y = 0.0;
            }
            None => {
                node.velocity.y *= keep;
                node.pos.y += node.velocity.y;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, x: f32, y: f32) -> SimNode {
        let mut node = SimNode::at_origin(id);
        node.pos = vec2(x, y);
        node
    }

    #[test]
    fn jiggle_is_tiny_and_reproducible() {
        let mut first = Jiggle::new();
        let mut second = Jiggle::new();
        for _ in 0..16 {
            let value = first.next();
            assert_eq!(value, second.next());
            assert!(value.abs() <= JIGGLE_SCALE);
        }
        assert_eq!(first.nonzero(3.0), 3.0);
    }

    #[test]
    fn link_params_balance_degrees() {
        let links = vec![
            SimLink { source: 0, target: 1, amount: 1.0 },
            SimLink { source: 0, target: 2, amount: 1.0 },
        ];
        let params = link_params(3, &links);
        assert_eq!(params[0].strength, 1.0);
        assert!((params[0].bias - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn stretched_link_pulls_endpoints_together() {
        let mut nodes = vec![node("a", 0.0, 0.0), node("b", 100.0, 0.0)];
        let links = vec![SimLink { source: 0, target: 1, amount: 1.0 }];
        let params = link_params(2, &links);

        apply_link_force(&mut nodes, &links, &params, 30.0, 1.0, &mut Jiggle::new());

        assert!(nodes[0].velocity.x > 0.0);
        assert!(nodes[1].velocity.x < 0.0);
    }

    #[test]
    fn negative_charge_pushes_pairs_apart() {
        let mut nodes = vec![node("a", 0.0, 0.0), node("b", 10.0, 0.0)];
        let mut positions = Vec::new();

        apply_many_body_force(&mut nodes, &mut positions, -200.0, 1.0, 1.0, &mut Jiggle::new());

        assert!(nodes[0].velocity.x < 0.0);
        assert!(nodes[1].velocity.x > 0.0);
        assert!((nodes[0].velocity.x + nodes[1].velocity.x).abs() < 1e-4);
    }

    #[test]
    fn coincident_points_still_separate() {
        let mut nodes = vec![node("a", 0.0, 0.0), node("b", 0.0, 0.0)];
        let mut positions = Vec::new();

        apply_many_body_force(&mut nodes, &mut positions, -200.0, 1.0, 1.0, &mut Jiggle::new());

        assert!(nodes.iter().all(|node| node.velocity.is_finite()));
        assert!(nodes[0].velocity.length() > 0.0);
    }

    #[test]
    fn centering_moves_centroid_exactly() {
        let mut nodes = vec![node("a", 0.0, 0.0), node("b", 10.0, 20.0)];
        apply_center_force(&mut nodes, vec2(400.0, 300.0));

        let centroid = (nodes[0].pos + nodes[1].pos) / 2.0;
        assert!((centroid - vec2(400.0, 300.0)).length() < 1e-3);
        assert_eq!(nodes[1].pos - nodes[0].pos, vec2(10.0, 20.0));
    }

    #[test]
    fn pinned_axes_ignore_velocity() {
        let mut nodes = vec![node("a", 5.0, 5.0)];
        nodes[0].velocity = vec2(10.0, 10.0);
        nodes[0].fx = Some(42.0);

        integrate(&mut nodes, 0.4);

        assert_eq!(nodes[0].pos.x, 42.0);
        assert_eq!(nodes[0].velocity.x, 0.0);
        assert!((nodes[0].pos.y - 11.0).abs() < 1e-5);
    }
}
