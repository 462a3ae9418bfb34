//! Shared record fixtures for the integration tests.

#![allow(dead_code)]

use serde_json::{Map, Value};
use typedrec_schema::{
    FieldDef, FieldValue, NativeKind, Record, RecordSchema, SchemaRegistry, TypeDescriptor,
};

/// Unwrap a `json!` object literal into a map.
pub fn obj(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

fn optional(name: &str, ty: TypeDescriptor) -> FieldDef {
    FieldDef::new(name, ty).with_default(FieldValue::Null)
}

fn register(registry: &mut SchemaRegistry, schema: RecordSchema) {
    registry.register(schema).expect("fixture schema registers");
}

/// Documents, books, lists and graphs.
pub fn documents() -> SchemaRegistry {
    let mut r = SchemaRegistry::new();
    register(
        &mut r,
        RecordSchema::new("Label").field(FieldDef::new("name", TypeDescriptor::str())),
    );
    register(
        &mut r,
        RecordSchema::new("Paragraph")
            .field(FieldDef::new("text", TypeDescriptor::str()))
            .field(optional("labels", TypeDescriptor::list(TypeDescriptor::record("Label")))),
    );
    register(
        &mut r,
        RecordSchema::new("Document")
            .field(FieldDef::new("name", TypeDescriptor::str()))
            .field(optional(
                "paragraphs",
                TypeDescriptor::list(TypeDescriptor::record("Paragraph")),
            ))
            .field(optional("tags", TypeDescriptor::list(TypeDescriptor::str()))),
    );
    register(
        &mut r,
        RecordSchema::new("Author").field(FieldDef::new("name", TypeDescriptor::str())),
    );
    register(
        &mut r,
        RecordSchema::new("Book")
            .field(FieldDef::new("title", TypeDescriptor::str()))
            .field(FieldDef::new("author", TypeDescriptor::record("Author"))),
    );
    register(
        &mut r,
        RecordSchema::new("NestedListWithUniformTypes").field(FieldDef::new(
            "name",
            TypeDescriptor::list(TypeDescriptor::list(TypeDescriptor::str())),
        )),
    );
    register(
        &mut r,
        RecordSchema::new("MissingListType").field(optional(
            "some_list",
            TypeDescriptor::list(TypeDescriptor::type_var("T")),
        )),
    );
    register(
        &mut r,
        RecordSchema::new("UsesNativeList")
            .field(optional("some_list", TypeDescriptor::native(NativeKind::List))),
    );
    register(
        &mut r,
        RecordSchema::new("UsesNestedNativeList").field(FieldDef::new(
            "some_list",
            TypeDescriptor::list(TypeDescriptor::list(TypeDescriptor::native(NativeKind::List))),
        )),
    );
    for (name, kind) in [
        ("ListOfTuples", NativeKind::Tuple),
        ("ListOfSet", NativeKind::Set),
        ("ListOfDict", NativeKind::Map),
    ] {
        register(
            &mut r,
            RecordSchema::new(name).field(FieldDef::new(
                "name",
                TypeDescriptor::list(TypeDescriptor::native(kind)),
            )),
        );
    }
    register(
        &mut r,
        RecordSchema::new("ListOfInt")
            .field(FieldDef::new("name", TypeDescriptor::list(TypeDescriptor::int()))),
    );
    register(
        &mut r,
        RecordSchema::new("Object3").field(FieldDef::new("name", TypeDescriptor::str())),
    );
    register(
        &mut r,
        RecordSchema::new("Object2")
            .field(FieldDef::new("name", TypeDescriptor::str()))
            .field(FieldDef::new(
                "subobjects",
                TypeDescriptor::list(TypeDescriptor::record("Object3")),
            )),
    );
    register(
        &mut r,
        RecordSchema::new("Object1")
            .field(FieldDef::new("name", TypeDescriptor::str()))
            .field(FieldDef::new(
                "subobjects",
                TypeDescriptor::list(TypeDescriptor::record("Object2")),
            )),
    );
    register(
        &mut r,
        RecordSchema::new("Node").field(optional("next_node", TypeDescriptor::self_ref("Node"))),
    );
    register(
        &mut r,
        RecordSchema::new("GraphNode").field(FieldDef::new(
            "children",
            TypeDescriptor::list(TypeDescriptor::self_ref("GraphNode")),
        )),
    );
    r
}

/// Optional and union fields.
pub fn optionals() -> SchemaRegistry {
    let mut r = SchemaRegistry::new();
    register(
        &mut r,
        RecordSchema::new("PersonWithOptionalAge")
            .field(FieldDef::new("name", TypeDescriptor::str()))
            .field(optional("age", TypeDescriptor::optional(TypeDescriptor::int()))),
    );
    register(
        &mut r,
        RecordSchema::new("FirstNameLastName")
            .field(FieldDef::new("first", TypeDescriptor::str()))
            .field(FieldDef::new("last", TypeDescriptor::str())),
    );
    register(
        &mut r,
        RecordSchema::new("PersonWithUnionType").field(FieldDef::new(
            "name",
            TypeDescriptor::union([
                TypeDescriptor::str(),
                TypeDescriptor::record("FirstNameLastName"),
            ]),
        )),
    );
    register(
        &mut r,
        RecordSchema::new("LinkedNode")
            .field(FieldDef::new("value", TypeDescriptor::int()))
            .field(optional(
                "next",
                TypeDescriptor::optional(TypeDescriptor::self_ref("LinkedNode")),
            )),
    );
    register(
        &mut r,
        RecordSchema::new("Library").field(optional(
            "authors",
            TypeDescriptor::optional(TypeDescriptor::list(TypeDescriptor::record(
                "FirstNameLastName",
            ))),
        )),
    );
    r
}

/// Records declared in different key conventions.
pub fn mappings() -> SchemaRegistry {
    let mut r = SchemaRegistry::new();
    register(
        &mut r,
        RecordSchema::new("SnakeCaseObjects").field(FieldDef::new("object_id", TypeDescriptor::str())),
    );
    register(
        &mut r,
        RecordSchema::new("CamelCaseObjects").field(FieldDef::new("objectId", TypeDescriptor::str())),
    );
    register(
        &mut r,
        RecordSchema::new("ChildObject").field(FieldDef::new("objectId", TypeDescriptor::str())),
    );
    register(
        &mut r,
        RecordSchema::new("ParentObject")
            .field(FieldDef::new("objectId", TypeDescriptor::str()))
            .field(FieldDef::new("child", TypeDescriptor::record("ChildObject"))),
    );
    register(
        &mut r,
        RecordSchema::new("ChildList").field(FieldDef::new(
            "childObjects",
            TypeDescriptor::list(TypeDescriptor::record("ChildObject")),
        )),
    );
    r
}

/// Records with construction-only fields.
pub fn construction_only() -> SchemaRegistry {
    let mut r = SchemaRegistry::new();
    register(
        &mut r,
        RecordSchema::new("WithInit")
            .field(FieldDef::new("init", TypeDescriptor::str()).construction_only())
            .field(FieldDef::new("a", TypeDescriptor::int()).with_default(0i64))
            .field(FieldDef::new("b", TypeDescriptor::str()).with_default(""))
            .on_init(|ctx| {
                let init = ctx
                    .init_arg("init")
                    .and_then(FieldValue::as_str)
                    .unwrap_or_default()
                    .to_string();
                ctx.set("a", init.chars().count() as i64)?;
                ctx.set("b", init.chars().take(1).collect::<String>())
            }),
    );
    register(
        &mut r,
        RecordSchema::new("WithDefaultInit")
            .field(
                FieldDef::new("init", TypeDescriptor::optional(TypeDescriptor::str()))
                    .construction_only()
                    .with_default(FieldValue::Null),
            )
            .field(FieldDef::new("a", TypeDescriptor::int()).with_default(0i64))
            .field(FieldDef::new("b", TypeDescriptor::str()).with_default(""))
            .on_init(|ctx| {
                let Some(init) = ctx.init_arg("init").and_then(FieldValue::as_str) else {
                    return Ok(());
                };
                let init = init.to_string();
                ctx.set("a", init.chars().count() as i64)?;
                ctx.set("b", init.chars().take(1).collect::<String>())
            }),
    );
    register(
        &mut r,
        RecordSchema::new("WithNestedInit")
            .field(FieldDef::new("child_dc", TypeDescriptor::record("WithInit"))),
    );
    register(
        &mut r,
        RecordSchema::new("WithVeryNestedInit")
            .field(FieldDef::new("child_dc", TypeDescriptor::record("WithNestedInit"))),
    );
    register(
        &mut r,
        RecordSchema::new("WithoutInit")
            .field(FieldDef::new("a", TypeDescriptor::int()))
            .field(FieldDef::new("b", TypeDescriptor::str())),
    );
    register(
        &mut r,
        RecordSchema::new("SelfLoop")
            .field(optional("next", TypeDescriptor::self_ref("SelfLoop")))
            .field(optional("peer", TypeDescriptor::record("OtherLoop"))),
    );
    register(
        &mut r,
        RecordSchema::new("OtherLoop")
            .field(optional("back", TypeDescriptor::record("SelfLoop"))),
    );
    r
}

/// Shorthand for named construction.
pub fn build(registry: &SchemaRegistry, record: &str, args: Vec<(&str, FieldValue)>) -> Record {
    registry
        .construct(record, args)
        .unwrap_or_else(|e| panic!("constructing {record}: {e}"))
}
