//! Containment scopes of a model.
//!
//! Every container entity opens its own scope: the entities declared directly
//! inside it, laid out independently and then embedded in the parent as a
//! single sized node. The root scope holds the model's top-level entities.
//!
//! [`ScopeTree`] lists the scopes in post-order, so each child scope comes
//! before the scope containing its container; that is the order in which the
//! composer sizes them.

use log::{debug, warn};

use strata_core::{
    direction::Direction,
    identifier::Id,
    model::{Entity, Model},
};

/// The entities declared at one hierarchical level.
///
/// - Root scope: the model's top-level entities (container = None)
/// - Nested scope: the children of a container entity (container = Some(entity))
#[derive(Debug, Clone)]
pub struct ContainmentScope<'a> {
    container: Option<&'a Entity>,
    path: Vec<Id>,
    entities: &'a [Entity],
    direction: Direction,
    depth: usize,
}

impl<'a> ContainmentScope<'a> {
    /// Returns the container entity of a nested scope.
    pub fn container(&self) -> Option<&'a Entity> {
        self.container
    }

    /// Returns the qualified id of the container (`backend.workers`), or
    /// `None` for the root scope.
    pub fn container_id(&self) -> Option<Id> {
        qualified(&self.path)
    }

    /// Returns the path segments leading to this scope.
    pub fn path(&self) -> &[Id] {
        &self.path
    }

    /// Returns the entities declared directly in this scope.
    pub fn entities(&self) -> &'a [Entity] {
        self.entities
    }

    /// Returns the direction this scope is laid out in.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the nesting depth; the root scope is at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.container.is_none()
    }

    /// Returns the qualified id of `id` declared in this scope.
    ///
    /// ```
    /// # use strata::structure::ScopeTree;
    /// # use strata_core::{direction::Direction, identifier::Id, model::{Entity, Model}};
    /// let model = Model::new(
    ///     vec![Entity::new("backend").with_children(vec![Entity::new("api")])],
    ///     vec![],
    /// );
    /// let tree = ScopeTree::from_model(&model, Direction::default());
    /// let scope = tree.find(Id::new("backend")).unwrap();
    /// assert_eq!(scope.qualify(Id::new("api")), "backend.api");
    /// ```
    pub fn qualify(&self, id: Id) -> Id {
        match self.container_id() {
            Some(parent) => parent.join(id),
            None => id,
        }
    }
}

/// All scopes of a model in post-order (children before their parent).
#[derive(Debug, Clone)]
pub struct ScopeTree<'a> {
    scopes: Vec<ContainmentScope<'a>>,
}

impl<'a> ScopeTree<'a> {
    /// Collects the scopes of `model`, laying the root out in `direction`.
    ///
    /// Containers inherit the direction of their parent scope unless they
    /// declare a valid override of their own.
    pub fn from_model(model: &'a Model, direction: Direction) -> Self {
        let mut scopes = Vec::new();
        collect_scopes(
            &mut scopes,
            None,
            Vec::new(),
            model.entities(),
            direction,
            0,
        );
        debug!(scopes_count = scopes.len(); "Containment scopes collected");
        Self { scopes }
    }

    /// Returns the scopes in post-order.
    pub fn scopes(&self) -> std::slice::Iter<'_, ContainmentScope<'a>> {
        self.scopes.iter()
    }

    /// Returns the number of scopes, root included.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns the root scope.
    pub fn root(&self) -> Option<&ContainmentScope<'a>> {
        self.scopes.last()
    }

    /// Finds the scope opened by the container with the given qualified id.
    pub fn find(&self, container_id: Id) -> Option<&ContainmentScope<'a>> {
        self.scopes
            .iter()
            .find(|scope| scope.container_id() == Some(container_id))
    }
}

fn collect_scopes<'a>(
    scopes: &mut Vec<ContainmentScope<'a>>,
    container: Option<&'a Entity>,
    path: Vec<Id>,
    entities: &'a [Entity],
    direction: Direction,
    depth: usize,
) {
    for entity in entities.iter().filter(|entity| entity.is_container()) {
        let mut child_path = path.clone();
        child_path.push(entity.id());
        let child_direction = container_direction(entity, direction);
        collect_scopes(
            scopes,
            Some(entity),
            child_path,
            entity.children(),
            child_direction,
            depth + 1,
        );
    }

    scopes.push(ContainmentScope {
        container,
        path,
        entities,
        direction,
        depth,
    });
}

fn container_direction(entity: &Entity, inherited: Direction) -> Direction {
    let Some(value) = entity.direction() else {
        return inherited;
    };
    match value.parse() {
        Ok(direction) => direction,
        Err(err) => {
            warn!(container:% = entity.id(), value; "Ignoring container direction: {err}");
            inherited
        }
    }
}

fn qualified(path: &[Id]) -> Option<Id> {
    let (first, rest) = path.split_first()?;
    Some(rest.iter().fold(*first, |acc, segment| acc.join(*segment)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_model() -> Model {
        Model::new(
            vec![
                Entity::new("web"),
                Entity::new("backend").with_children(vec![
                    Entity::new("api"),
                    Entity::new("workers")
                        .with_direction("tb")
                        .with_children(vec![Entity::new("mailer")]),
                ]),
                Entity::new("ops")
                    .with_direction("sideways")
                    .with_children(vec![Entity::new("grafana")]),
            ],
            vec![],
        )
    }

    #[test]
    fn test_empty_model_has_root_scope() {
        let model = Model::default();
        let tree = ScopeTree::from_model(&model, Direction::default());
        assert_eq!(tree.len(), 1);
        let root = tree.root().unwrap();
        assert!(root.is_root());
        assert!(root.entities().is_empty());
        assert_eq!(root.container_id(), None);
    }

    #[test]
    fn test_post_order() {
        let model = nested_model();
        let tree = ScopeTree::from_model(&model, Direction::RightToLeft);

        let order: Vec<Option<String>> = tree
            .scopes()
            .map(|scope| scope.container_id().map(|id| id.to_string()))
            .collect();
        assert_eq!(
            order,
            vec![
                Some("backend.workers".to_string()),
                Some("backend".to_string()),
                Some("ops".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn test_depth_and_qualify() {
        let model = nested_model();
        let tree = ScopeTree::from_model(&model, Direction::default());

        let workers = tree.find(Id::new("backend.workers")).unwrap();
        assert_eq!(workers.depth(), 2);
        assert_eq!(workers.path(), &[Id::new("backend"), Id::new("workers")]);
        assert_eq!(workers.qualify(Id::new("mailer")), "backend.workers.mailer");
        assert_eq!(workers.container().unwrap().id(), "workers");

        let root = tree.root().unwrap();
        assert_eq!(root.depth(), 0);
        assert_eq!(root.qualify(Id::new("web")), "web");
    }

    #[test]
    fn test_direction_inheritance() {
        let model = nested_model();
        let tree = ScopeTree::from_model(&model, Direction::RightToLeft);

        assert_eq!(tree.root().unwrap().direction(), Direction::RightToLeft);
        assert_eq!(
            tree.find(Id::new("backend")).unwrap().direction(),
            Direction::RightToLeft
        );
        assert_eq!(
            tree.find(Id::new("backend.workers")).unwrap().direction(),
            Direction::TopToBottom
        );
        // Invalid overrides fall back to the parent scope's direction.
        assert_eq!(
            tree.find(Id::new("ops")).unwrap().direction(),
            Direction::RightToLeft
        );
    }
}
