use std::collections::HashSet;
use std::error::Error;
use std::fmt;

use super::{ConnectionRecord, NodeKind, NodeRecord, Placement, TARGET_NODE, Template};

/// Where a new internal node goes, by reference to records added earlier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePlacement<'a> {
    pub position_on: &'a str,
    pub position_towards: Option<&'a str>,
    pub position_away_from: Option<&'a str>,
    pub nudge: bool,
}

impl<'a> NodePlacement<'a> {
    pub fn on(name: &'a str) -> Self {
        Self { position_on: name, position_towards: None, position_away_from: None, nudge: false }
    }

    pub fn towards(mut self, name: &'a str) -> Self {
        self.position_towards = Some(name);
        self
    }

    pub fn away_from(mut self, name: &'a str) -> Self {
        self.position_away_from = Some(name);
        self
    }

    pub fn nudged(mut self) -> Self {
        self.nudge = true;
        self
    }
}

impl Default for NodePlacement<'_> {
    fn default() -> Self {
        Self::on(TARGET_NODE)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateBuildError {
    DuplicateNode(String),
    ReservedName,
    ExplicitTarget(String),
    UnknownNode(String),
    TargetConnection,
    SelfConnection(String),
    DuplicateConnection(String),
}

impl fmt::Display for TemplateBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateNode(name) => write!(f, "template already has a node named {name:?}"),
            Self::ReservedName => write!(f, "{TARGET_NODE:?} is reserved for the replaced node"),
            Self::ExplicitTarget(name) => {
                write!(f, "node {name:?} cannot be a target; every template has exactly one")
            }
            Self::UnknownNode(name) => write!(f, "template has no node named {name:?}"),
            Self::TargetConnection => {
                write!(f, "connections cannot touch {TARGET_NODE:?}; it is removed by expansion")
            }
            Self::SelfConnection(name) => write!(f, "node {name:?} cannot connect to itself"),
            Self::DuplicateConnection(name) => {
                write!(f, "connection {name} duplicates an existing connection")
            }
        }
    }
}

impl Error for TemplateBuildError {}

/// Accumulates node and connection records, validating names as it goes.
#[derive(Clone, Debug)]
pub struct TemplateBuilder {
    template: Template,
    connected: HashSet<(usize, usize)>,
}

impl TemplateBuilder {
    pub fn new(name: &str, codes: &str) -> Self {
        let target = NodeRecord {
            kind: NodeKind::Target,
            name: TARGET_NODE.to_owned(),
            codes: String::new(),
            radius: 0.0,
            placement: None,
        };
        Self {
            template: Template {
                name: name.to_owned(),
                codes: codes.to_owned(),
                nodes: vec![target],
                connections: Vec::new(),
                num_in_nodes: 0,
                num_out_nodes: 0,
                num_internal_nodes: 0,
            },
            connected: HashSet::new(),
        }
    }

    /// Adds an `In`, `Out` or `Internal` node. Internal nodes added this way
    /// sit on the target with no codes and zero radius.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        name: &str,
    ) -> Result<&mut Self, TemplateBuildError> {
        match kind {
            NodeKind::Target => Err(TemplateBuildError::ExplicitTarget(name.to_owned())),
            NodeKind::Internal => self.add_internal_node(name, NodePlacement::default(), "", 0.0),
            NodeKind::In | NodeKind::Out => {
                self.check_new_name(name)?;
                self.template.nodes.push(NodeRecord {
                    kind,
                    name: name.to_owned(),
                    codes: String::new(),
                    radius: 0.0,
                    placement: None,
                });
                if kind == NodeKind::In {
                    self.template.num_in_nodes += 1;
                } else {
                    self.template.num_out_nodes += 1;
                }
                Ok(self)
            }
        }
    }

    pub fn add_internal_node(
        &mut self,
        name: &str,
        placement: NodePlacement<'_>,
        codes: &str,
        radius: f64,
    ) -> Result<&mut Self, TemplateBuildError> {
        self.check_new_name(name)?;
        let placement = Placement {
            on: self.index_of(placement.position_on)?,
            towards: placement.position_towards.map(|n| self.index_of(n)).transpose()?,
            away_from: placement.position_away_from.map(|n| self.index_of(n)).transpose()?,
            nudge: placement.nudge,
        };
        self.template.nodes.push(NodeRecord {
            kind: NodeKind::Internal,
            name: name.to_owned(),
            codes: codes.to_owned(),
            radius,
            placement: Some(placement),
        });
        self.template.num_internal_nodes += 1;
        Ok(self)
    }

    pub fn connect(
        &mut self,
        from: &str,
        to: &str,
        min_length: f64,
        max_length: f64,
        half_width: f64,
    ) -> Result<&mut Self, TemplateBuildError> {
        let from_index = self.index_of(from)?;
        let to_index = self.index_of(to)?;
        if from_index == 0 || to_index == 0 {
            return Err(TemplateBuildError::TargetConnection);
        }
        if from_index == to_index {
            return Err(TemplateBuildError::SelfConnection(from.to_owned()));
        }
        let key = (from_index.min(to_index), from_index.max(to_index));
        if !self.connected.insert(key) {
            return Err(TemplateBuildError::DuplicateConnection(Template::connection_name(
                from, to,
            )));
        }

        self.template.connections.push(ConnectionRecord {
            from: from_index,
            to: to_index,
            min_length,
            max_length,
            half_width,
        });
        Ok(self)
    }

    /// Consumes the builder; a builder yields exactly one template.
    pub fn build(self) -> Template {
        self.template
    }

    fn check_new_name(&self, name: &str) -> Result<(), TemplateBuildError> {
        if name == TARGET_NODE {
            return Err(TemplateBuildError::ReservedName);
        }
        if self.template.nodes.iter().any(|record| record.name == name) {
            return Err(TemplateBuildError::DuplicateNode(name.to_owned()));
        }
        Ok(())
    }

    fn index_of(&self, name: &str) -> Result<usize, TemplateBuildError> {
        self.template
            .nodes
            .iter()
            .position(|record| record.name == name)
            .ok_or_else(|| TemplateBuildError::UnknownNode(name.to_owned()))
    }
}
