//! OpenAPI description of the resource routes, browsable through Swagger UI.

use crate::models::{Object, Record, Well, WellDayHistory, WellDayPlan};
// utoipa's derive treats a bare `Object` ident as its generic-object virtual type.
use crate::models::Object as ObjectSchema;
use crate::table::ColumnKind;
use utoipa::openapi::path::{HttpMethod, OperationBuilder, ParameterBuilder, ParameterIn, PathItem};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::schema::{Array, ObjectBuilder, Schema, SchemaFormat, Type};
use utoipa::openapi::{ContentBuilder, OpenApi as OpenApiDoc, Ref, RefOr, Required, ResponseBuilder};
use utoipa::OpenApi;

/// Swagger UI mount point; `/swagger/` serves the page.
pub const SWAGGER_UI_PATH: &str = "/swagger";
/// Raw document the UI loads.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Oilfield records API",
        description = "CRUD over objects, wells, daily well history and daily well plans."
    ),
    components(schemas(ObjectSchema, Well, WellDayHistory, WellDayPlan)),
    tags(
        (name = "objects", description = "Generic entities"),
        (name = "wells", description = "Wells and their classification"),
        (name = "well_day_histories", description = "Realized daily measurements"),
        (name = "well_day_plans", description = "Planned daily measurements")
    )
)]
pub struct ApiDoc;

/// Complete document: derived components plus one path item per resource.
pub fn api_doc() -> OpenApiDoc {
    let mut doc = ApiDoc::openapi();
    add_resource::<Object>(&mut doc, "/objects", "Object");
    add_resource::<Well>(&mut doc, "/wells", "Well");
    add_resource::<WellDayHistory>(&mut doc, "/well_day_histories", "WellDayHistory");
    add_resource::<WellDayPlan>(&mut doc, "/well_day_plans", "WellDayPlan");
    doc
}

fn add_resource<R: Record>(doc: &mut OpenApiDoc, path: &str, schema: &str) {
    let tag = R::SPEC.table;
    let one = || -> RefOr<Schema> { Ref::from_schema_name(schema).into() };
    let many = RefOr::T(Schema::Array(Array::new(one())));

    let list = operation(tag, "List every record")
        .response("200", json_response("All records", many))
        .response("500", text_response("Store error"))
        .build();
    let create = with_body(operation(tag, "Create a record"), one())
        .response("200", json_response("Stored record", one()))
        .response("400", text_response("Malformed JSON"))
        .response("500", text_response("Store error"))
        .build();
    let update = with_body(operation(tag, "Replace a record by key"), one())
        .response("200", json_response("Updated record", one()))
        .response("400", text_response("Malformed JSON"))
        .response("404", text_response("No rows affected"))
        .response("500", text_response("Store error"))
        .build();
    let mut delete = operation(tag, "Delete a record by key")
        .response("204", ResponseBuilder::new().description("Deleted").build())
        .response("400", text_response("Missing or invalid key parameter"))
        .response("404", text_response("No rows affected"))
        .response("500", text_response("Store error"));
    for col in R::SPEC.key {
        let (ty, format) = match col.kind {
            ColumnKind::Int => (Type::Integer, None),
            ColumnKind::Float => (Type::Number, None),
            ColumnKind::Text => (Type::String, None),
            ColumnKind::Date => (Type::String, Some("date")),
        };
        let mut param_schema = ObjectBuilder::new().schema_type(ty);
        if let Some(format) = format {
            param_schema = param_schema.format(Some(SchemaFormat::Custom(format.into())));
        }
        delete = delete.parameter(
            ParameterBuilder::new()
                .name(col.name)
                .parameter_in(ParameterIn::Query)
                .required(Required::True)
                .schema(Some(RefOr::T(Schema::Object(param_schema.build()))))
                .build(),
        );
    }

    let mut item = PathItem::new(HttpMethod::Get, list);
    item.post = Some(create);
    item.put = Some(update);
    item.delete = Some(delete.build());
    doc.paths.paths.insert(path.to_string(), item);
}

fn operation(tag: &str, summary: &str) -> OperationBuilder {
    OperationBuilder::new()
        .tags(Some(vec![tag.to_string()]))
        .summary(Some(summary))
}

fn with_body(builder: OperationBuilder, schema: RefOr<Schema>) -> OperationBuilder {
    builder.request_body(Some(
        RequestBodyBuilder::new()
            .content("application/json", ContentBuilder::new().schema(Some(schema)).build())
            .required(Some(Required::True))
            .build(),
    ))
}

fn json_response(description: &str, schema: RefOr<Schema>) -> utoipa::openapi::Response {
    ResponseBuilder::new()
        .description(description)
        .content("application/json", ContentBuilder::new().schema(Some(schema)).build())
        .build()
}

fn text_response(description: &str) -> utoipa::openapi::Response {
    ResponseBuilder::new()
        .description(description)
        .content(
            "text/plain",
            ContentBuilder::new()
                .schema(Some(RefOr::T(Schema::Object(
                    ObjectBuilder::new().schema_type(Type::String).build(),
                ))))
                .build(),
        )
        .build()
}
