use super::super::surface::Surface;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(in crate::app) struct HighlightSet {
    pub(in crate::app) center: usize,
    pub(in crate::app) neighbors: Vec<usize>,
    pub(in crate::app) links: Vec<usize>,
}

pub(in crate::app) fn collect_highlight_set(surface: &Surface, center: usize) -> HighlightSet {
    let links = surface.incident_links(center).to_vec();

    let mut neighbors = links
        .iter()
        .filter_map(|&index| surface.links().get(index))
        .map(|link| {
            if link.source == center {
                link.target
            } else {
                link.source
            }
        })
        .filter(|&other| other != center)
        .collect::<Vec<_>>();
    neighbors.sort_unstable();
    neighbors.dedup();

    HighlightSet {
        center,
        neighbors,
        links,
    }
}
