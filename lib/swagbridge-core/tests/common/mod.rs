use rstest::fixture;
use serde_json::json;
use swagbridge_core::Converter;
use swagbridge_core::spec::{ApiDocument, v2, v3};
use tracing::info;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

#[fixture]
pub fn converter() -> Converter {
    init_tracing();
    Converter::default()
}

#[fixture]
pub fn petstore() -> v2::Swagger {
    init_tracing();
    let value = json!({
        "swagger": "2.0",
        "info": { "title": "Petstore", "version": "1.2.0" },
        "host": "petstore.example.com",
        "basePath": "/v2",
        "schemes": ["https"],
        "paths": {
            "/pets": {
                "get": {
                    "operationId": "listPets",
                    "produces": ["application/json"],
                    "parameters": [{
                        "name": "limit",
                        "in": "query",
                        "type": "integer",
                        "minimum": 0,
                        "maximum": 100
                    }],
                    "responses": {
                        "200": {
                            "description": "pets",
                            "schema": { "type": "array", "items": { "$ref": "#/definitions/Pet" } }
                        }
                    }
                },
                "post": {
                    "operationId": "createPet",
                    "consumes": ["application/json"],
                    "produces": ["application/json"],
                    "parameters": [{
                        "name": "pet",
                        "in": "body",
                        "required": true,
                        "schema": { "$ref": "#/definitions/NewPet" }
                    }],
                    "responses": {
                        "201": { "description": "created", "schema": { "$ref": "#/definitions/Pet" } }
                    }
                }
            },
            "/pets/{petId}": {
                "parameters": [{ "name": "petId", "in": "path", "required": true, "type": "string" }],
                "get": {
                    "operationId": "showPet",
                    "produces": ["application/json"],
                    "responses": {
                        "200": { "description": "pet", "schema": { "$ref": "#/definitions/Pet" } },
                        "404": { "$ref": "#/responses/NotFound" }
                    }
                }
            },
            "/pets/{petId}/photo": {
                "parameters": [{ "name": "petId", "in": "path", "required": true, "type": "string" }],
                "post": {
                    "operationId": "uploadPhoto",
                    "consumes": ["multipart/form-data"],
                    "parameters": [
                        { "name": "photo", "in": "formData", "required": true, "type": "file" },
                        { "name": "caption", "in": "formData", "type": "string" }
                    ],
                    "responses": { "204": { "description": "stored" } }
                }
            }
        },
        "definitions": {
            "NewPet": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": { "type": "string" },
                    "tag": { "type": "string" }
                }
            },
            "Pet": {
                "allOf": [
                    { "$ref": "#/definitions/NewPet" },
                    { "type": "object", "properties": { "id": { "type": "integer", "format": "int64" } } }
                ]
            },
            "Error": {
                "type": "object",
                "properties": { "message": { "type": "string" } }
            }
        },
        "responses": {
            "NotFound": { "description": "not found", "schema": { "$ref": "#/definitions/Error" } }
        },
        "securityDefinitions": {
            "api_key": { "type": "apiKey", "name": "X-Api-Key", "in": "header" }
        },
        "security": [{ "api_key": [] }]
    });
    match v2::Swagger::from_value(value) {
        Ok(document) => document,
        Err(error) => panic!("invalid petstore fixture: {error}"),
    }
}

#[fixture]
pub fn zoo() -> v3::OpenApi {
    init_tracing();
    let value = json!({
        "openapi": "3.1.0",
        "info": { "title": "Zoo", "version": "2.0.0" },
        "servers": [{ "url": "https://zoo.example.com/api" }],
        "paths": {
            "/animals": {
                "get": {
                    "operationId": "listAnimals",
                    "x-visibility": "public",
                    "parameters": [
                        { "name": "filter", "in": "query", "schema": { "$ref": "#/components/schemas/Filter" } }
                    ],
                    "responses": {
                        "200": {
                            "description": "animals",
                            "content": {
                                "application/json": {
                                    "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Animal" } }
                                }
                            }
                        }
                    }
                },
                "post": {
                    "operationId": "createAnimal",
                    "x-visibility": "private",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": { "schema": { "$ref": "#/components/schemas/NewAnimal" } }
                        }
                    },
                    "responses": {
                        "201": {
                            "description": "created",
                            "content": {
                                "application/json": { "schema": { "$ref": "#/components/schemas/Animal" } }
                            }
                        }
                    }
                }
            },
            "/keepers/{keeperId}": {
                "get": {
                    "operationId": "showKeeper",
                    "x-visibility": "private",
                    "parameters": [{ "$ref": "#/components/parameters/KeeperId" }],
                    "responses": {
                        "200": {
                            "description": "keeper",
                            "content": {
                                "application/json": { "schema": { "$ref": "#/components/schemas/Keeper" } }
                            }
                        }
                    }
                }
            },
            "/status": {
                "get": {
                    "operationId": "status",
                    "responses": {
                        "200": {
                            "description": "status",
                            "content": {
                                "application/json": { "schema": { "$ref": "#/components/schemas/Status" } }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Animal": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "species": { "$ref": "#/components/schemas/Species" }
                    }
                },
                "Species": { "type": "string", "enum": ["lion", "zebra"] },
                "NewAnimal": {
                    "allOf": [{ "$ref": "#/components/schemas/Animal" }],
                    "required": ["name"]
                },
                "Keeper": {
                    "type": "object",
                    "properties": {
                        "animals": { "type": "array", "items": { "$ref": "#/components/schemas/Animal" } },
                        "mentor": { "$ref": "#/components/schemas/Keeper" }
                    }
                },
                "Status": { "type": "object", "properties": { "ok": { "type": "boolean" } } },
                "Filter": { "type": "string" },
                "Unused": { "type": "object" }
            },
            "parameters": {
                "KeeperId": { "name": "keeperId", "in": "path", "required": true, "schema": { "type": "string" } },
                "Page": { "name": "page", "in": "query", "schema": { "type": "integer" } }
            }
        }
    });
    match v3::OpenApi::from_value(value) {
        Ok(document) => document,
        Err(error) => panic!("invalid zoo fixture: {error}"),
    }
}
