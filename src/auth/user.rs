use oso::PolarClass;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Acting user of a feed server request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub roles: Vec<String>,
}

impl User {
    pub fn new(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            roles: vec![],
        }
    }

    /// Unauthenticated reader.
    pub fn guest() -> Self {
        Self {
            id: Uuid::nil(),
            username: String::new(),
            roles: vec!["guest".into()],
        }
    }

    fn is_creator(&self, creator_id: String) -> bool {
        self.id.to_string() == creator_id
    }

    fn has_role(&self, role: String) -> bool {
        self.roles.iter().any(|x| x == &role)
    }
}

impl PolarClass for User {
    fn get_polar_class_builder() -> oso::ClassBuilder<User> {
        oso::Class::builder()
            .name("User")
            .add_attribute_getter("id", |recv: &User| recv.id.to_string())
            .add_attribute_getter("username", |recv: &User| recv.username.clone())
            .add_attribute_getter("roles", |recv: &User| recv.roles.clone())
            .add_method("is_creator", User::is_creator)
            .add_method("has_role", User::has_role)
    }

    fn get_polar_class() -> oso::Class {
        let builder = User::get_polar_class_builder();
        builder.build()
    }
}
