pub mod codec;
pub mod field_key;
pub mod field_rule;
pub mod field_spec;
pub mod schema;
pub mod typed_node;
pub mod value;

pub use codec::Codec;
pub use field_key::FieldKey;
pub use field_rule::FieldRule;
pub use field_spec::FieldSpec;
pub use schema::Schema;
pub use typed_node::TypedNode;
pub use value::Value;
