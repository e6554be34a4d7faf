use oso::{Oso, PolarClass};

use crate::auth::User;
use crate::entities::Post;
use crate::error::Error;

impl PolarClass for Post {
    fn get_polar_class_builder() -> oso::ClassBuilder<Post> {
        oso::Class::builder()
            .name("Post")
            .add_attribute_getter("id", |recv: &Post| recv.id)
            .add_attribute_getter("creator_id", |recv: &Post| {
                recv.creator
                    .as_ref()
                    .map(|creator| creator.id.to_string())
                    .unwrap_or_default()
            })
    }

    fn get_polar_class() -> oso::Class {
        let builder = Post::get_polar_class_builder();
        builder.build()
    }
}

pub fn new() -> Result<Oso, Error> {
    let mut o = Oso::new();

    o.register_class(User::get_polar_class())?;
    o.register_class(Post::get_polar_class())?;

    o.load_str(include_str!("rules.polar"))?;

    Ok(o)
}
