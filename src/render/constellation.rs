//! Constellation map state: clusters, node slots, zoom and selection.
//!
//! The map owns no rendering. The binary's `app::map` paints whatever this
//! state says, and feeds clicks back through `click_cluster`, `select`,
//! `zoom_out` and `back`.

use crate::zodiac::{Constellation, Sign};

/// A node position in percent of the cluster's sign area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub top: f32,
    pub left: f32,
}

impl Slot {
    const fn at(top: f32, left: f32) -> Self {
        Self { top, left }
    }

    /// Position as `(x, y)` fractions in `0.0..=1.0`.
    pub fn fraction(self) -> (f32, f32) {
        (self.left * 0.01, self.top * 0.01)
    }
}

pub const SLOTS_PER_CLUSTER: usize = 4;

/// Fixed node layout for each constellation, shaped to fit its outline.
pub fn slots(kind: Constellation) -> &'static [Slot; SLOTS_PER_CLUSTER] {
    const HAUNTED: [Slot; 4] = [
        Slot::at(30.0, 20.0),
        Slot::at(30.0, 80.0),
        Slot::at(75.0, 20.0),
        Slot::at(75.0, 80.0),
    ];
    const NOSTALGIA: [Slot; 4] = [
        Slot::at(15.0, 50.0),
        Slot::at(50.0, 90.0),
        Slot::at(85.0, 50.0),
        Slot::at(50.0, 10.0),
    ];
    const ISOLATION: [Slot; 4] = [
        Slot::at(75.0, 15.0),
        Slot::at(20.0, 50.0),
        Slot::at(75.0, 85.0),
        Slot::at(50.0, 35.0),
    ];
    const SURREALISM: [Slot; 4] = [
        Slot::at(70.0, 20.0),
        Slot::at(20.0, 50.0),
        Slot::at(70.0, 80.0),
        Slot::at(40.0, 80.0),
    ];
    const UNCHARTED: [Slot; 4] = [
        Slot::at(25.0, 25.0),
        Slot::at(25.0, 75.0),
        Slot::at(75.0, 75.0),
        Slot::at(75.0, 25.0),
    ];

    match kind {
        Constellation::HauntedTechnology => &HAUNTED,
        Constellation::AbsurdNostalgia => &NOSTALGIA,
        Constellation::CosmicIsolation => &ISOLATION,
        Constellation::DomesticSurrealism => &SURREALISM,
        Constellation::Uncharted => &UNCHARTED,
    }
}

/// Slot for the `index`-th entry of a cluster. Wraps past the last slot.
pub fn slot(kind: Constellation, index: usize) -> Slot {
    slots(kind)[index % SLOTS_PER_CLUSTER]
}

/// One named group of signs.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub name: String,
    pub kind: Constellation,
    pub signs: Vec<Sign>,
}

impl Cluster {
    /// Entries paired with their node positions.
    pub fn nodes(&self) -> impl Iterator<Item = (&Sign, Slot)> + '_ {
        self.signs
            .iter()
            .enumerate()
            .map(move |(i, sign)| (sign, slot(self.kind, i)))
    }

    /// Id-safe slug, e.g. `cosmic-isolation`.
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Lowercase and join whitespace-separated words with `-`.
fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Partition the catalog by constellation name, in order of first appearance.
pub fn group_catalog(catalog: &[Sign]) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();
    for sign in catalog {
        match clusters.iter_mut().find(|c| c.name == sign.constellation) {
            Some(cluster) => cluster.signs.push(sign.clone()),
            None => clusters.push(Cluster {
                name: sign.constellation.clone(),
                kind: sign.kind(),
                signs: vec![sign.clone()],
            }),
        }
    }
    clusters
}

/// What the caller should do after a header action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapAction {
    Stay,
    Close,
}

/// View and selection state of an open map.
#[derive(Debug, Clone)]
pub struct ConstellationMap {
    user: Sign,
    clusters: Vec<Cluster>,
    zoomed: Option<usize>,
    selected: Sign,
}

impl ConstellationMap {
    pub fn new(user: Sign, catalog: &[Sign]) -> Self {
        Self {
            clusters: group_catalog(catalog),
            selected: user.clone(),
            zoomed: None,
            user,
        }
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn selected(&self) -> &Sign {
        &self.selected
    }

    /// The zoomed cluster, if any.
    pub fn zoomed(&self) -> Option<&Cluster> {
        self.zoomed.and_then(|i| self.clusters.get(i))
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed.is_some()
    }

    pub fn is_user(&self, sign: &Sign) -> bool {
        sign.name == self.user.name
    }

    pub fn is_selected(&self, sign: &Sign) -> bool {
        sign.name == self.selected.name
    }

    /// Whether `cluster` holds the user's own sign.
    pub fn is_home(&self, cluster: &Cluster) -> bool {
        cluster.name == self.user.constellation
    }

    /// Click on a cluster, or on one of its nodes while in overview.
    ///
    /// Zooms in if needed. The selection becomes the clicked node, else the
    /// user's sign when it lives in that cluster, else the first entry.
    pub fn click_cluster(&mut self, name: &str, clicked: Option<&Sign>) {
        let Some(index) = self.clusters.iter().position(|c| c.name == name) else {
            log::debug!("Ignoring click on unknown cluster {:?}", name);
            return;
        };

        if self.zoomed == Some(index) {
            if let Some(sign) = clicked {
                self.select(sign);
            }
            return;
        }

        self.zoomed = Some(index);
        let cluster = &self.clusters[index];
        let next = clicked
            .cloned()
            .or_else(|| cluster.signs.iter().find(|s| s.name == self.user.name).cloned())
            .or_else(|| cluster.signs.first().cloned());
        if let Some(sign) = next {
            self.selected = sign;
        }
    }

    /// Select a node.
    pub fn select(&mut self, sign: &Sign) {
        self.selected = sign.clone();
    }

    /// Return to overview with the user's own sign selected.
    pub fn zoom_out(&mut self) {
        self.zoomed = None;
        self.selected = self.user.clone();
    }

    /// Header button: zoom out when zoomed, otherwise close the map.
    pub fn back(&mut self) -> MapAction {
        if self.is_zoomed() {
            self.zoom_out();
            MapAction::Stay
        } else {
            MapAction::Close
        }
    }

    pub fn back_label(&self) -> &'static str {
        if self.is_zoomed() {
            "\u{2190} Back to Map"
        } else {
            "\u{2190} Back to Result"
        }
    }

    /// Number of entries across all clusters currently marked selected.
    pub fn selected_count(&self) -> usize {
        self.clusters
            .iter()
            .flat_map(|c| c.signs.iter())
            .filter(|s| self.is_selected(s))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(name: &str, constellation: &str) -> Sign {
        Sign {
            name: name.to_string(),
            emoji: "✨".to_string(),
            constellation: constellation.to_string(),
            compatibility: format!("{} gets along with everyone", name),
            absurdity: 3,
            ..Sign::default()
        }
    }

    fn catalog() -> Vec<Sign> {
        vec![
            sign("The Hermit", "Cosmic Isolation"),
            sign("Extinct Mall Mascot", "Absurd Nostalgia"),
            sign("Lunar Elevator Muzak", "Cosmic Isolation"),
            sign("VHS Fitness Instructor Ghost", "Absurd Nostalgia"),
        ]
    }

    #[test]
    fn grouping_keeps_first_appearance_order() {
        let clusters = group_catalog(&catalog());
        let names: Vec<&str> = clusters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Cosmic Isolation", "Absurd Nostalgia"]);
        assert_eq!(clusters[0].signs[1].name, "Lunar Elevator Muzak");
        assert_eq!(clusters[0].kind, Constellation::CosmicIsolation);
        assert_eq!(clusters[0].slug(), "cosmic-isolation");
    }

    #[test]
    fn map_starts_in_overview_on_the_user() {
        let user = sign("The Hermit", "Cosmic Isolation");
        let map = ConstellationMap::new(user.clone(), &catalog());
        assert!(!map.is_zoomed());
        assert!(map.is_selected(&user));
        assert_eq!(map.selected_count(), 1);
        assert_eq!(map.clusters().iter().map(|c| c.signs.len()).sum::<usize>(), 4);
        assert!(map.is_home(&map.clusters()[0]));
        assert!(!map.is_home(&map.clusters()[1]));
    }

    #[test]
    fn cluster_click_selects_user_when_present() {
        let user = sign("Lunar Elevator Muzak", "Cosmic Isolation");
        let mut map = ConstellationMap::new(user, &catalog());
        map.click_cluster("Absurd Nostalgia", None);
        map.zoom_out();
        map.click_cluster("Cosmic Isolation", None);
        assert_eq!(map.zoomed().map(|c| c.name.as_str()), Some("Cosmic Isolation"));
        assert_eq!(map.selected().name, "Lunar Elevator Muzak");
    }

    #[test]
    fn cluster_click_falls_back_to_first_entry() {
        let user = sign("The Hermit", "Cosmic Isolation");
        let mut map = ConstellationMap::new(user, &catalog());
        map.click_cluster("Absurd Nostalgia", None);
        assert_eq!(map.selected().name, "Extinct Mall Mascot");
        assert_eq!(map.selected_count(), 1);
    }

    #[test]
    fn explicit_node_click_wins() {
        let user = sign("The Hermit", "Cosmic Isolation");
        let all = catalog();
        let mut map = ConstellationMap::new(user, &all);
        map.click_cluster("Cosmic Isolation", Some(&all[2]));
        assert_eq!(map.selected().name, "Lunar Elevator Muzak");

        // Already zoomed: a bare cluster click keeps the selection.
        map.click_cluster("Cosmic Isolation", None);
        assert_eq!(map.selected().name, "Lunar Elevator Muzak");
        map.click_cluster("Cosmic Isolation", Some(&all[0]));
        assert_eq!(map.selected().name, "The Hermit");
        assert_eq!(map.selected_count(), 1);
    }

    #[test]
    fn zoom_out_restores_the_user() {
        let user = sign("The Hermit", "Cosmic Isolation");
        let all = catalog();
        let mut map = ConstellationMap::new(user, &all);
        map.click_cluster("Absurd Nostalgia", Some(&all[3]));
        assert_eq!(map.back_label(), "\u{2190} Back to Map");
        assert_eq!(map.back(), MapAction::Stay);
        assert!(!map.is_zoomed());
        assert_eq!(map.selected().name, "The Hermit");
        assert_eq!(map.back(), MapAction::Close);
    }

    #[test]
    fn unknown_cluster_click_is_ignored() {
        let user = sign("The Hermit", "Cosmic Isolation");
        let mut map = ConstellationMap::new(user, &catalog());
        map.click_cluster("Nowhere", None);
        assert!(!map.is_zoomed());
        assert_eq!(map.selected().name, "The Hermit");
    }

    #[test]
    fn nodes_use_cluster_slots_and_wrap() {
        let mut big: Vec<Sign> = (0..6)
            .map(|i| sign(&format!("Sign {}", i), "Haunted Technology"))
            .collect();
        big.push(sign("Stray", "Somewhere Else"));
        let clusters = group_catalog(&big);
        let positions: Vec<Slot> = clusters[0].nodes().map(|(_, s)| s).collect();
        let table = slots(Constellation::HauntedTechnology);
        assert_eq!(positions[..4], table[..]);
        assert_eq!(positions[4], table[0]);
        assert_eq!(positions[5], table[1]);
        assert_eq!(clusters[1].kind, Constellation::Uncharted);
        assert_eq!(slot(Constellation::Uncharted, 0).fraction(), (0.25, 0.25));
    }

    #[test]
    fn cluster_slug_is_id_safe() {
        let clusters = group_catalog(&catalog());
        assert_eq!(clusters[0].slug(), "cosmic-isolation");
        assert_eq!(slugify("  Haunted   Technology "), "haunted-technology");
    }
}
