//! Property-based invariant tests for the hierarchy engine and layout.
//!
//! Random sequences of user operations are replayed against an engine and
//! the following must hold after every step:
//!
//! 1. Forest invariant: every edge joins existing nodes, at most one parent
//!    per node, no cycles.
//! 2. Preorder: in the stacked arrangement y strictly increases along the
//!    placement order.
//! 3. Depth implies indentation in the stacked arrangement.
//! 4. No overlap once collision resolution converges, in both arrangements.
//! 5. Collapse hides exactly the descendants and a double toggle restores
//!    the visible layout.
//! 6. Subtree deletion removes the node, all descendants and their edges.

use std::collections::HashSet;

use hierarchy_wasm::config::{LayoutConfig, SiblingArrangement};
use hierarchy_wasm::graph::{is_forest, HierarchyEngine, Node, NodeId, SequentialIds};
use hierarchy_wasm::layout::compute_layout;
use hierarchy_wasm::tree::{build_relationships, descendants_of, Relationships};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// A user action. Selectors pick a node by index modulo the node count.
#[derive(Debug, Clone)]
enum Op {
    AddRoot,
    AddChild(usize),
    Remove(usize),
    Toggle(usize),
    Relabel(usize, String),
    Measure(usize, f32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::AddRoot),
        8 => any::<usize>().prop_map(Op::AddChild),
        2 => any::<usize>().prop_map(Op::Remove),
        2 => any::<usize>().prop_map(Op::Toggle),
        1 => (any::<usize>(), "[ a-z]{0,12}").prop_map(|(i, s)| Op::Relabel(i, s)),
        2 => (any::<usize>(), 100.0f32..400.0).prop_map(|(i, h)| Op::Measure(i, h)),
    ]
}

fn ops(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(op_strategy(), 1..=max_len)
}

fn arrangement_strategy() -> impl Strategy<Value = SiblingArrangement> {
    prop_oneof![Just(SiblingArrangement::Stacked), Just(SiblingArrangement::SideBySide)]
}

fn engine(config: LayoutConfig) -> HierarchyEngine {
    HierarchyEngine::with_id_source(config, Box::new(SequentialIds::new())).unwrap()
}

fn pick(engine: &HierarchyEngine, selector: usize) -> Option<NodeId> {
    let nodes = engine.nodes();
    if nodes.is_empty() {
        return None;
    }
    Some(nodes[selector % nodes.len()].id.clone())
}

fn apply(engine: &mut HierarchyEngine, op: &Op) {
    if engine.is_empty() {
        engine.add_root();
        return;
    }
    match op {
        Op::AddRoot => {
            engine.add_root();
        }
        Op::AddChild(i) => {
            if let Some(id) = pick(engine, *i) {
                engine.add_child(&id);
            }
        }
        Op::Remove(i) => {
            if let Some(id) = pick(engine, *i) {
                engine.remove_subtree(&id);
            }
        }
        Op::Toggle(i) => {
            if let Some(id) = pick(engine, *i) {
                engine.toggle_collapse(&id);
            }
        }
        Op::Relabel(i, label) => {
            if let Some(id) = pick(engine, *i) {
                engine.relabel(&id, label);
            }
        }
        Op::Measure(i, h) => {
            if let Some(id) = pick(engine, *i) {
                engine.record_height(&id, *h);
            }
        }
    }
}

fn build(config: LayoutConfig, script: &[Op]) -> HierarchyEngine {
    let mut engine = engine(config);
    for op in script {
        apply(&mut engine, op);
    }
    engine
}

/// Number of parent hops from `id` up to its root.
fn depth_of(rel: &Relationships, id: &str) -> usize {
    let mut depth = 0;
    let mut current = id;
    while let Some(parent) = rel.parent(current) {
        depth += 1;
        current = parent;
    }
    depth
}

fn overlapping(a: &Node, ha: f32, b: &Node, hb: f32, width: f32, gap: f32) -> bool {
    let (pa, pb) = (a.position, b.position);
    pa.x < pb.x + width + gap
        && pb.x < pa.x + width + gap
        && pa.y < pb.y + hb + gap
        && pb.y < pa.y + ha + gap
}

// ── 1. Forest invariant ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn forest_invariant_holds_after_every_op(script in ops(40)) {
        let mut engine = engine(LayoutConfig::default());
        for op in &script {
            apply(&mut engine, op);
            prop_assert!(is_forest(engine.nodes(), engine.edges()), "broken after {:?}", op);

            let mut targets = HashSet::new();
            for edge in engine.edges() {
                prop_assert!(engine.contains(&edge.source));
                prop_assert!(engine.contains(&edge.target));
                prop_assert!(targets.insert(edge.target.clone()), "{} has two parents", edge.target);
            }
        }
    }
}

// ── 2./3. Preorder and indentation ──────────────────────────────────────

proptest! {
    #[test]
    fn stacked_layout_is_preorder_and_indented(script in ops(40)) {
        let config = LayoutConfig::default();
        let engine = build(config.clone(), &script);

        let visible = engine.visible_nodes();
        let edges = engine.visible_edges();
        let layout = compute_layout(&visible, edges, engine.heights(), &config);
        prop_assert_eq!(layout.len(), visible.len(), "every visible node is placed");

        for pair in layout.order.windows(2) {
            let (a, b) = (layout.get(pair[0].as_str()), layout.get(pair[1].as_str()));
            prop_assert!(a.unwrap().y < b.unwrap().y, "{} not above {}", pair[0], pair[1]);
        }

        let rel = build_relationships(&visible, edges);
        for node in &visible {
            let depth = depth_of(&rel, node.id.as_str());
            let expected = config.base_x + depth as f32 * config.indent_offset;
            prop_assert_eq!(node.position.x, expected, "{} at depth {}", node.id, depth);
        }
    }
}

// ── 4. No overlap ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn converged_layout_has_no_overlap(
        script in ops(30),
        arrangement in arrangement_strategy(),
    ) {
        let config = LayoutConfig {
            arrangement,
            max_iterations: 200,
            ..Default::default()
        };
        let engine = build(config.clone(), &script);
        prop_assume!(engine.layout_converged());

        let visible = engine.visible_nodes();
        let heights = engine.heights();
        for (i, a) in visible.iter().enumerate() {
            for b in &visible[i + 1..] {
                prop_assert!(
                    !overlapping(
                        a,
                        heights.height(a.id.as_str()),
                        b,
                        heights.height(b.id.as_str()),
                        config.node_width,
                        config.min_node_spacing,
                    ),
                    "{} overlaps {}",
                    a.id,
                    b.id
                );
            }
        }
    }
}

// ── 5. Collapse ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn collapse_hides_descendants_and_round_trips(script in ops(30), selector in any::<usize>()) {
        let mut engine = build(LayoutConfig::default(), &script);
        if engine.is_empty() {
            engine.add_root();
        }
        let target = pick(&engine, selector).unwrap();
        let before = engine.visible_nodes();
        let was_collapsed = engine.node(&target).unwrap().is_collapsed();
        let was_hidden = engine.is_hidden(&target);

        prop_assert!(engine.toggle_collapse(&target));
        // Only ancestors decide whether the node itself is hidden.
        prop_assert_eq!(engine.is_hidden(&target), was_hidden);
        if !was_collapsed {
            for id in descendants_of(&target, engine.edges()) {
                prop_assert!(engine.is_hidden(&id), "{} should be hidden", id);
            }
        }

        prop_assert!(engine.toggle_collapse(&target));
        prop_assert_eq!(engine.visible_nodes(), before);
    }
}

// ── 6. Subtree deletion ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn subtree_deletion_is_total(script in ops(30), selector in any::<usize>()) {
        let mut engine = build(LayoutConfig::default(), &script);
        if engine.is_empty() {
            engine.add_root();
        }
        let target = pick(&engine, selector).unwrap();
        let mut doomed = descendants_of(&target, engine.edges());
        doomed.insert(target.clone());
        let before = engine.node_count();

        prop_assert!(engine.remove_subtree(&target));
        prop_assert_eq!(engine.node_count(), before - doomed.len());
        for id in &doomed {
            prop_assert!(!engine.contains(id));
            prop_assert!(engine.heights().height(id.as_str()) == engine.heights().default_height());
        }
        for edge in engine.edges() {
            prop_assert!(!doomed.contains(&edge.source) && !doomed.contains(&edge.target));
        }
    }
}

// ── Scenario ────────────────────────────────────────────────────────────

#[test]
fn scenario_child_numbering_survives_sibling_removal() {
    let mut engine = engine(LayoutConfig::default());
    let r = engine.add_root();
    let c1 = engine.add_child(&r).unwrap();
    let c2 = engine.add_child(&r).unwrap();
    let g1 = engine.add_child(&c1).unwrap();

    let y = |e: &HierarchyEngine, id: &NodeId| e.node(id).unwrap().position.y;
    assert!(y(&engine, &r) < y(&engine, &c1));
    assert!(y(&engine, &c1) < y(&engine, &g1));
    assert!(y(&engine, &g1) < y(&engine, &c2));

    engine.remove_subtree(&c1);
    let labels: Vec<&str> = engine.nodes().iter().map(Node::label).collect();
    assert_eq!(labels, vec!["Root", "Child 2"]);
    assert!(!engine.contains(&g1));
}
