//! Built-in template library used by the CLI and the viewer.

use std::rc::Rc;

use crate::template::{
    NodeKind, NodePlacement, TARGET_NODE, Template, TemplateBuildError, TemplateBuilder,
};

const CORRIDOR_MIN: f64 = 40.0;
const CORRIDOR_MAX: f64 = 120.0;
const CORRIDOR_HALF_WIDTH: f64 = 6.0;
const ROOM_RADIUS: f64 = 18.0;
const JUNCTION_RADIUS: f64 = 10.0;

/// Codes marking a node later passes may expand further.
pub const EXPANDABLE: &str = "e";

#[derive(Clone, Debug)]
pub struct TemplateStore {
    templates: Vec<Rc<Template>>,
}

impl TemplateStore {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates: templates.into_iter().map(Rc::new).collect() }
    }

    /// Corridor extension, side room, loop, fork and dead-end cap.
    pub fn standard() -> Result<Self, TemplateBuildError> {
        Ok(Self::new(vec![
            corridor_extension()?,
            side_room()?,
            loop_around()?,
            fork()?,
            dead_end_cap()?,
        ]))
    }

    pub fn templates(&self) -> &[Rc<Template>] {
        &self.templates
    }

    pub fn get(&self, name: &str) -> Option<&Rc<Template>> {
        self.templates.iter().find(|template| template.name() == name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn corridor(builder: &mut TemplateBuilder, from: &str, to: &str) -> Result<(), TemplateBuildError> {
    builder.connect(from, to, CORRIDOR_MIN, CORRIDOR_MAX, CORRIDOR_HALF_WIDTH)?;
    Ok(())
}

/// One room becomes two joined by a corridor.
fn corridor_extension() -> Result<Template, TemplateBuildError> {
    let mut builder = TemplateBuilder::new("corridor_extension", "");
    builder.add_node(NodeKind::In, "i")?.add_node(NodeKind::Out, "o")?;
    builder.add_internal_node(
        "near",
        NodePlacement::on(TARGET_NODE).towards("i"),
        EXPANDABLE,
        ROOM_RADIUS,
    )?;
    builder.add_internal_node(
        "far",
        NodePlacement::on(TARGET_NODE).towards("o").nudged(),
        EXPANDABLE,
        ROOM_RADIUS,
    )?;
    corridor(&mut builder, "i", "near")?;
    corridor(&mut builder, "near", "far")?;
    corridor(&mut builder, "far", "o")?;
    Ok(builder.build())
}

/// Keeps the through route and hangs a room off it.
fn side_room() -> Result<Template, TemplateBuildError> {
    let mut builder = TemplateBuilder::new("side_room", "");
    builder.add_node(NodeKind::In, "i")?.add_node(NodeKind::Out, "o")?;
    builder.add_internal_node("hub", NodePlacement::on(TARGET_NODE), EXPANDABLE, JUNCTION_RADIUS)?;
    builder.add_internal_node(
        "room",
        NodePlacement::on(TARGET_NODE).away_from("i").nudged(),
        "",
        ROOM_RADIUS,
    )?;
    corridor(&mut builder, "i", "hub")?;
    corridor(&mut builder, "hub", "o")?;
    corridor(&mut builder, "hub", "room")?;
    Ok(builder.build())
}

/// Two routes between the same pair of junctions.
fn loop_around() -> Result<Template, TemplateBuildError> {
    let mut builder = TemplateBuilder::new("loop", "");
    builder.add_node(NodeKind::In, "i")?.add_node(NodeKind::Out, "o")?;
    builder.add_internal_node(
        "split",
        NodePlacement::on(TARGET_NODE).towards("i"),
        "",
        JUNCTION_RADIUS,
    )?;
    builder.add_internal_node(
        "join",
        NodePlacement::on(TARGET_NODE).towards("o"),
        "",
        JUNCTION_RADIUS,
    )?;
    builder.add_internal_node(
        "detour",
        NodePlacement::on(TARGET_NODE).nudged(),
        EXPANDABLE,
        ROOM_RADIUS,
    )?;
    corridor(&mut builder, "i", "split")?;
    corridor(&mut builder, "split", "join")?;
    corridor(&mut builder, "split", "detour")?;
    corridor(&mut builder, "detour", "join")?;
    corridor(&mut builder, "join", "o")?;
    Ok(builder.build())
}

/// The route continues and a dead-end branch leaves the junction.
fn fork() -> Result<Template, TemplateBuildError> {
    let mut builder = TemplateBuilder::new("fork", "");
    builder.add_node(NodeKind::In, "i")?.add_node(NodeKind::Out, "o")?;
    builder.add_internal_node(
        "junction",
        NodePlacement::on(TARGET_NODE).towards("i"),
        "",
        JUNCTION_RADIUS,
    )?;
    builder.add_internal_node(
        "onward",
        NodePlacement::on(TARGET_NODE).towards("o"),
        EXPANDABLE,
        ROOM_RADIUS,
    )?;
    builder.add_internal_node(
        "branch",
        NodePlacement::on("junction").away_from("o").nudged(),
        EXPANDABLE,
        ROOM_RADIUS,
    )?;
    corridor(&mut builder, "i", "junction")?;
    corridor(&mut builder, "junction", "onward")?;
    corridor(&mut builder, "onward", "o")?;
    corridor(&mut builder, "junction", "branch")?;
    Ok(builder.build())
}

/// Replaces a dead end with a corridor ending in a larger room.
fn dead_end_cap() -> Result<Template, TemplateBuildError> {
    let mut builder = TemplateBuilder::new("dead_end_cap", "");
    builder.add_node(NodeKind::In, "i")?;
    builder.add_internal_node(
        "approach",
        NodePlacement::on(TARGET_NODE).towards("i").nudged(),
        "",
        JUNCTION_RADIUS,
    )?;
    builder.add_internal_node(
        "cap",
        NodePlacement::on(TARGET_NODE).away_from("i"),
        "",
        ROOM_RADIUS * 1.5,
    )?;
    corridor(&mut builder, "i", "approach")?;
    corridor(&mut builder, "approach", "cap")?;
    Ok(builder.build())
}
