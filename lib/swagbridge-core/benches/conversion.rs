use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;
use swagbridge_core::spec::{ApiDocument, v2};
use swagbridge_core::{Converter, Partitionable};

/// Builds a Swagger 2.0 document with `count` resources.
///
/// Each resource has a list and a create operation, a definition referencing the previous
/// resource, and alternates between public and private visibility.
fn generated_document(count: usize) -> v2::Swagger {
    let mut paths = serde_json::Map::new();
    let mut definitions = serde_json::Map::new();

    for index in 0..count {
        let name = format!("Resource{index}");
        let visibility = if index % 2 == 0 { "public" } else { "private" };
        let mut properties = json!({
            "id": { "type": "integer", "format": "int64", "minimum": 0 },
            "name": { "type": "string", "maxLength": 64 }
        });
        if index > 0 {
            properties["parent"] = json!({ "$ref": format!("#/definitions/Resource{}", index - 1) });
        }
        definitions.insert(name.clone(), json!({ "type": "object", "properties": properties }));

        paths.insert(
            format!("/resources{index}"),
            json!({
                "get": {
                    "x-visibility": visibility,
                    "produces": ["application/json"],
                    "parameters": [
                        { "name": "limit", "in": "query", "type": "integer", "minimum": 1, "maximum": 100 },
                        { "name": "tags", "in": "query", "type": "array", "items": { "type": "string" }, "collectionFormat": "multi" }
                    ],
                    "responses": {
                        "200": { "description": "list", "schema": { "type": "array", "items": { "$ref": format!("#/definitions/{name}") } } }
                    }
                },
                "post": {
                    "x-visibility": visibility,
                    "consumes": ["application/json"],
                    "parameters": [
                        { "name": "body", "in": "body", "required": true, "schema": { "$ref": format!("#/definitions/{name}") } }
                    ],
                    "responses": { "201": { "description": "created" } }
                }
            }),
        );
    }

    let value = json!({
        "swagger": "2.0",
        "info": { "title": "Generated", "version": "1.0.0" },
        "host": "api.example.com",
        "basePath": "/v1",
        "schemes": ["https"],
        "paths": Value::Object(paths),
        "definitions": Value::Object(definitions)
    });
    v2::Swagger::from_value(value).expect("generated document is valid")
}

fn benchmark_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");
    let converter = Converter::default();

    for count in [10, 100, 500] {
        let legacy = generated_document(count);
        let modern = converter.to_v3(&legacy).expect("converted").document;

        group.bench_with_input(BenchmarkId::new("to_v3", count), &legacy, |b, legacy| {
            b.iter(|| converter.to_v3(black_box(legacy)));
        });
        group.bench_with_input(BenchmarkId::new("to_v2", count), &modern, |b, modern| {
            b.iter(|| converter.to_v2(black_box(modern)));
        });
        group.bench_with_input(BenchmarkId::new("round_trip", count), &legacy, |b, legacy| {
            b.iter(|| {
                let modern = converter.to_v3(black_box(legacy)).expect("converted").document;
                converter.to_v2(&modern)
            });
        });
    }

    group.finish();
}

fn benchmark_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");

    for count in [10, 100, 500] {
        let legacy = generated_document(count);

        group.bench_with_input(BenchmarkId::new("split_by_visibility", count), &legacy, |b, legacy| {
            b.iter(|| black_box(legacy).split_by_visibility());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_conversion, benchmark_partition);
criterion_main!(benches);
