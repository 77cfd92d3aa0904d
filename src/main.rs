use anyhow::Context;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use log::{info, warn};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use snare_engine::catalog::LocationCatalog;
use snare_engine::config::EngineConfig;
use snare_engine::data::read_catalog_from_file;
use snare_engine::geometry::Point3;
use snare_engine::report::{parse_show_location, pretty_distance};
use snare_engine::snare::{PlanSummary, Route, SnarePlan};

static CATALOG: OnceCell<LocationCatalog> = OnceCell::new();

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum EngineRequest {
    Plan {
        source: String,
        destination: String,
    },
    Check {
        source: String,
        destination: String,
        #[serde(default)]
        position: Option<Point3>,
        #[serde(default)]
        show_location: Option<String>,
    },
    Locations,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum EngineResponse {
    Plan {
        plan: PlanSummary,
    },
    Check {
        plan: PlanSummary,
        route: Route,
        within_snare_cone: bool,
    },
    Locations {
        names: Vec<String>,
    },
    Error {
        message: String,
    },
}

fn plan_for(
    catalog: &LocationCatalog,
    source: &str,
    destination: &str,
) -> Result<SnarePlan, String> {
    let source = catalog.get(source).map_err(|e| e.to_string())?;
    let destination = catalog.get(destination).map_err(|e| e.to_string())?;
    SnarePlan::new(source.clone(), destination.clone()).map_err(|e| e.to_string())
}

fn respond(catalog: &LocationCatalog, req: EngineRequest) -> EngineResponse {
    match req {
        EngineRequest::Plan {
            source,
            destination,
        } => match plan_for(catalog, &source, &destination) {
            Ok(plan) => {
                info!(
                    "planned {} -> {}: optimal pullout {} from destination",
                    source,
                    destination,
                    pretty_distance(plan.optimal_pullout_distance())
                );
                EngineResponse::Plan {
                    plan: plan.summary(),
                }
            }
            Err(message) => EngineResponse::Error { message },
        },
        EngineRequest::Check {
            source,
            destination,
            position,
            show_location,
        } => {
            let candidate = match (position, show_location) {
                (Some(p), _) => p,
                (None, Some(text)) => match parse_show_location(&text) {
                    Ok(p) => p,
                    Err(e) => return EngineResponse::Error { message: e.to_string() },
                },
                (None, None) => {
                    return EngineResponse::Error {
                        message: "check needs a position or show_location".into(),
                    }
                }
            };
            let plan = match plan_for(catalog, &source, &destination) {
                Ok(plan) => plan,
                Err(message) => return EngineResponse::Error { message },
            };
            match plan.score(candidate) {
                Ok(route) => EngineResponse::Check {
                    plan: plan.summary(),
                    within_snare_cone: route.within_snare_cone(),
                    route,
                },
                Err(e) => EngineResponse::Error { message: e.to_string() },
            }
        }
        EngineRequest::Locations => EngineResponse::Locations {
            names: catalog.display_names(),
        },
    }
}

async fn handler(event: LambdaEvent<EngineRequest>) -> Result<EngineResponse, Error> {
    let catalog = CATALOG.get().ok_or("location catalog not loaded")?;
    Ok(respond(catalog, event.payload))
}

fn load_catalog(config: &EngineConfig) -> anyhow::Result<LocationCatalog> {
    let path = &config.catalog_path;
    let catalog = if config.catalog_is_json() {
        LocationCatalog::from_json_file(path, &config.filter)
            .with_context(|| format!("failed to read catalog JSON {}", path.display()))?
    } else {
        read_catalog_from_file(path)
            .with_context(|| format!("failed to read catalog bundle {}", path.display()))?
    };
    if catalog.is_empty() {
        warn!("catalog {} contains no usable locations", path.display());
    }
    Ok(catalog)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let config = EngineConfig::from_env();
    let catalog = load_catalog(&config)?;
    info!("loaded {} locations from {}", catalog.len(), config.catalog_path.display());
    CATALOG
        .set(catalog)
        .map_err(|_| "location catalog initialised twice")?;

    let func = service_fn(handler);
    lambda_runtime::run(func).await
}
