use super::*;
use crate::graph::Node;
use crate::random::seeded_rng;

fn corridor_split() -> Template {
    let mut builder = TemplateBuilder::new("split", "");
    builder
        .add_node(NodeKind::In, "i")
        .and_then(|b| b.add_node(NodeKind::Out, "o"))
        .and_then(|b| {
            b.add_internal_node("x", NodePlacement::on(TARGET_NODE).towards("i"), "x", 3.0)
        })
        .and_then(|b| {
            b.add_internal_node(
                "y",
                NodePlacement::on("i").towards(TARGET_NODE).away_from("o"),
                "",
                0.0,
            )
        })
        .and_then(|b| b.connect("i", "x", 10.0, 20.0, 1.0))
        .and_then(|b| b.connect("x", "o", 10.0, 20.0, 1.0))
        .expect("split template is valid");
    builder.build()
}

fn single_in_leaf(nudge: bool) -> Template {
    let mut placement = NodePlacement::on(TARGET_NODE);
    if nudge {
        placement = placement.nudged();
    }
    let mut builder = TemplateBuilder::new("leaf", "");
    builder
        .add_node(NodeKind::In, "i")
        .and_then(|b| b.add_internal_node("leaf", placement, "", 0.0))
        .and_then(|b| b.connect("i", "leaf", 10.0, 20.0, 1.0))
        .expect("leaf template is valid");
    builder.build()
}

struct Line {
    graph: Graph,
    input: NodeId,
    target: NodeId,
    output: NodeId,
}

fn line(input: XY, target: XY, output: XY) -> Line {
    let mut graph = Graph::new();
    let i = graph.add_node("in", "", "", 0.0);
    let t = graph.add_node("target", "", "", 0.0);
    let o = graph.add_node("out", "", "", 0.0);
    graph.set_pos(i, input);
    graph.set_pos(t, target);
    graph.set_pos(o, output);
    graph.connect(i, t, 1.0, 100.0, 1.0);
    graph.connect(t, o, 1.0, 100.0, 1.0);
    Line { graph, input: i, target: t, output: o }
}

fn node_named(graph: &Graph, name: &str) -> NodeId {
    graph
        .all_nodes()
        .iter()
        .copied()
        .find(|&id| graph.node(id).is_some_and(|node| node.name == name))
        .expect("node present")
}

#[test]
fn counts_and_nodes_added() {
    let split = corridor_split();
    assert_eq!(split.name(), "split");
    assert_eq!(split.num_in_nodes(), 1);
    assert_eq!(split.num_out_nodes(), 1);
    assert_eq!(split.num_internal_nodes(), 2);
    assert_eq!(split.num_connections(), 2);
    assert_eq!(split.nodes_added(), 1);

    assert_eq!(TemplateBuilder::new("empty", "").build().nodes_added(), -1);

    let mut in_only = TemplateBuilder::new("in-only", "");
    in_only.add_node(NodeKind::In, "i").expect("in node");
    assert_eq!(in_only.build().nodes_added(), -1);

    let mut one_internal = TemplateBuilder::new("one-internal", "");
    one_internal
        .add_node(NodeKind::In, "i")
        .and_then(|b| b.add_node(NodeKind::Internal, "a"))
        .expect("valid");
    assert_eq!(one_internal.build().nodes_added(), 0);
}

#[test]
fn expansion_rewires_and_removes_the_target() {
    let Line { mut graph, input, target, output } =
        line(XY::new(0.0, -100.0), XY::ZERO, XY::new(0.0, 100.0));
    let mut rng = seeded_rng(3);

    assert!(corridor_split().expand(&mut graph, target, &mut rng));

    assert!(!graph.contains(target));
    assert_eq!(graph.num_nodes(), 4);
    let x = node_named(&graph, "x");
    let y = node_named(&graph, "y");
    assert!(graph.connects(input, x));
    assert!(graph.connects(x, output));
    assert_eq!(graph.num_edges(), 2);
    assert_eq!(graph.node(y).map(Node::degree), Some(0));

    let x_node = graph.node(x).expect("x exists");
    assert_eq!(x_node.codes, "x");
    assert_eq!(x_node.template, "split");
    assert_eq!(x_node.radius, 3.0);
    let edge = graph.edge_between(input, x).expect("edge exists");
    assert_eq!((edge.min_length, edge.max_length, edge.half_width), (10.0, 20.0, 1.0));
    graph.assert_invariants();
}

#[test]
fn positions_follow_on_towards_and_away_from() {
    let Line { mut graph, target, .. } =
        line(XY::new(-40.0, 0.0), XY::new(10.0, 20.0), XY::new(60.0, 120.0));
    let mut rng = seeded_rng(3);

    assert!(corridor_split().expand(&mut graph, target, &mut rng));

    // x: target + 0.1 * (in - target)
    let x = graph.pos(node_named(&graph, "x"));
    assert!(x.approx_eq(XY::new(5.0, 18.0), 1e-9), "x at {x:?}");
    // y: in + 0.1 * (target - in) - 0.1 * (out - in)
    let y = graph.pos(node_named(&graph, "y"));
    assert!(y.approx_eq(XY::new(-45.0, -10.0), 1e-9), "y at {y:?}");
}

fn leaf_placed(placement: NodePlacement<'_>) -> Template {
    let mut builder = TemplateBuilder::new("placed", "");
    builder
        .add_node(NodeKind::In, "i")
        .and_then(|b| b.add_internal_node("leaf", placement, "", 0.0))
        .and_then(|b| b.connect("i", "leaf", 10.0, 20.0, 1.0))
        .expect("placed template is valid");
    builder.build()
}

#[test]
fn ten_percent_towards_and_away_from_an_in_node() {
    let cases = [
        (NodePlacement::on(TARGET_NODE).towards("i"), XY::new(-5.0, 2.0)),
        (NodePlacement::on(TARGET_NODE).away_from("i"), XY::new(-3.0, 4.0)),
    ];
    for (placement, expected) in cases {
        let Line { mut graph, target, output, .. } =
            line(XY::new(-14.0, -7.0), XY::new(-4.0, 3.0), XY::new(30.0, 30.0));
        graph.disconnect(target, output);
        let mut rng = seeded_rng(1);

        assert!(leaf_placed(placement).expand(&mut graph, target, &mut rng));
        let leaf = graph.pos(node_named(&graph, "leaf"));
        assert!(leaf.approx_eq(expected, 1e-12), "expected {expected:?}, got {leaf:?}");
    }
}

#[test]
fn nudge_moves_a_fixed_distance() {
    for seed in 0..8 {
        let Line { mut graph, target, output, .. } =
            line(XY::new(0.0, -100.0), XY::ZERO, XY::new(0.0, 100.0));
        graph.disconnect(target, output);
        let mut rng = seeded_rng(seed);

        assert!(single_in_leaf(true).expand(&mut graph, target, &mut rng));
        let leaf = graph.pos(node_named(&graph, "leaf"));
        assert!((leaf.length() - NUDGE_DISTANCE).abs() < 1e-9, "seed {seed}: {leaf:?}");
    }
}

#[test]
fn unnudged_node_sits_on_its_anchor() {
    let Line { mut graph, target, output, .. } =
        line(XY::new(0.0, -100.0), XY::new(7.0, 3.0), XY::new(0.0, 100.0));
    graph.disconnect(target, output);
    let mut rng = seeded_rng(1);

    assert!(single_in_leaf(false).expand(&mut graph, target, &mut rng));
    assert_eq!(graph.pos(node_named(&graph, "leaf")), XY::new(7.0, 3.0));
}

#[test]
fn arity_mismatch_leaves_the_graph_untouched() {
    let Line { mut graph, target, .. } =
        line(XY::new(0.0, -100.0), XY::ZERO, XY::new(0.0, 100.0));
    let before = graph.clone();
    let mut rng = seeded_rng(1);

    // leaf wants one in and no outs; the target has one of each
    assert!(!single_in_leaf(false).expand(&mut graph, target, &mut rng));
    assert_eq!(graph, before);

    let mut two_ins = TemplateBuilder::new("two-ins", "");
    two_ins
        .add_node(NodeKind::In, "a")
        .and_then(|b| b.add_node(NodeKind::In, "b"))
        .and_then(|b| b.add_node(NodeKind::Out, "c"))
        .expect("valid");
    assert!(!two_ins.build().expand(&mut graph, target, &mut rng));
    assert_eq!(graph, before);
}

#[test]
fn crossing_edges_fail_until_the_obstacle_is_removed() {
    let mut graph = Graph::new();
    let a = graph.add_node("a", "", "", 0.0);
    let b = graph.add_node("b", "", "", 0.0);
    let c = graph.add_node("c", "", "", 0.0);
    let d = graph.add_node("d", "", "", 0.0);
    graph.set_pos(a, XY::new(10.0, 0.0));
    graph.set_pos(b, XY::new(-10.0, 0.0));
    graph.set_pos(c, XY::new(0.0, 10.0));
    graph.set_pos(d, XY::new(0.0, -10.0));
    graph.connect(a, b, 1.0, 100.0, 1.0);
    graph.connect(c, d, 1.0, 100.0, 1.0);
    let mut rng = seeded_rng(1);
    let leaf = single_in_leaf(false);

    let restore = graph.create_restore_point();
    assert!(!leaf.expand(&mut graph, d, &mut rng));
    graph.restore(restore);
    assert!(graph.contains(d));
    assert!(graph.connects(c, d));

    graph.disconnect(a, b);
    let mut rng = seeded_rng(1);
    assert!(leaf.expand(&mut graph, d, &mut rng));
    assert!(!graph.contains(d));
    assert!(!has_crossing_edges(&graph));
}

#[test]
fn template_edge_duplicating_an_existing_edge_fails() {
    let Line { mut graph, input, target, output } =
        line(XY::new(-50.0, 0.0), XY::new(0.0, 40.0), XY::new(50.0, 0.0));
    graph.connect(input, output, 1.0, 100.0, 1.0);

    let mut shortcut = TemplateBuilder::new("shortcut", "");
    shortcut
        .add_node(NodeKind::In, "i")
        .and_then(|b| b.add_node(NodeKind::Out, "o"))
        .and_then(|b| b.connect("i", "o", 1.0, 100.0, 1.0))
        .expect("valid");

    let mut rng = seeded_rng(1);
    assert!(!shortcut.build().expand(&mut graph, target, &mut rng));
}

#[test]
fn builder_rejects_bad_names() {
    let mut builder = TemplateBuilder::new("bad", "");
    builder.add_node(NodeKind::In, "i").expect("first in");

    assert_eq!(
        builder.add_node(NodeKind::Out, "i").err(),
        Some(TemplateBuildError::DuplicateNode("i".to_owned()))
    );
    assert_eq!(
        builder.add_node(NodeKind::Internal, TARGET_NODE).err(),
        Some(TemplateBuildError::ReservedName)
    );
    assert_eq!(
        builder.add_node(NodeKind::Target, "t").err(),
        Some(TemplateBuildError::ExplicitTarget("t".to_owned()))
    );
    assert_eq!(
        builder.add_internal_node("x", NodePlacement::on("nowhere"), "", 0.0).err(),
        Some(TemplateBuildError::UnknownNode("nowhere".to_owned()))
    );
    // the failed add above must not leave "x" behind
    builder.add_internal_node("x", NodePlacement::on("i"), "", 0.0).expect("x now valid");
    assert_eq!(builder.build().num_internal_nodes(), 1);
}

#[test]
fn builder_rejects_bad_connections() {
    let mut builder = TemplateBuilder::new("bad", "");
    builder
        .add_node(NodeKind::In, "i")
        .and_then(|b| b.add_node(NodeKind::Internal, "x"))
        .and_then(|b| b.connect("i", "x", 1.0, 2.0, 1.0))
        .expect("valid prefix");

    assert_eq!(
        builder.connect("x", "i", 1.0, 2.0, 1.0).err(),
        Some(TemplateBuildError::DuplicateConnection(Template::connection_name("x", "i")))
    );
    assert_eq!(
        builder.connect("x", "x", 1.0, 2.0, 1.0).err(),
        Some(TemplateBuildError::SelfConnection("x".to_owned()))
    );
    assert_eq!(
        builder.connect("i", TARGET_NODE, 1.0, 2.0, 1.0).err(),
        Some(TemplateBuildError::TargetConnection)
    );
    assert_eq!(
        builder.connect("i", "y", 1.0, 2.0, 1.0).err(),
        Some(TemplateBuildError::UnknownNode("y".to_owned()))
    );
    assert_eq!(builder.build().num_connections(), 1);
}

#[test]
fn build_errors_render_readably() {
    let message = TemplateBuildError::DuplicateConnection(Template::connection_name("a", "b"));
    assert_eq!(message.to_string(), "connection a->b duplicates an existing connection");
}
