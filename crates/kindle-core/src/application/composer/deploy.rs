//! Remote deployment manifests.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    application::composer::{to_toml, to_yaml},
    domain::{ArtifactBundle, ArtifactRole, DeployTarget, ResolvedContext, slug},
    error::KindleResult,
};

pub(super) fn add(ctx: &ResolvedContext, bundle: &mut ArtifactBundle) -> KindleResult<()> {
    match ctx.config().deploy_target() {
        DeployTarget::FlyIo => {
            bundle.add_file(
                "fly.toml",
                to_toml("fly.toml", &FlyConfig::for_context(ctx))?,
                ArtifactRole::Standard,
            )?;
        }
        DeployTarget::Kubernetes => {
            bundle.add_file(K8S_MANIFEST, kubernetes(ctx)?, ArtifactRole::Standard)?;
        }
        DeployTarget::Local => {}
    }
    Ok(())
}

const K8S_MANIFEST: &str = "k8s/deployment.yaml";

// Plain keys precede tables so the TOML stays valid.
#[derive(Serialize)]
struct FlyConfig<'a> {
    app: &'a str,
    primary_region: &'static str,
    build: FlyBuild,
    env: BTreeMap<&'static str, String>,
    http_service: FlyHttpService,
}

#[derive(Serialize)]
struct FlyBuild {
    dockerfile: &'static str,
}

#[derive(Serialize)]
struct FlyHttpService {
    internal_port: u16,
    force_https: bool,
    auto_stop_machines: &'static str,
    auto_start_machines: bool,
    min_machines_running: u32,
}

impl<'a> FlyConfig<'a> {
    fn for_context(ctx: &'a ResolvedContext) -> Self {
        let port = ctx.ports().application;
        Self {
            app: ctx.slug(),
            primary_region: "iad",
            build: FlyBuild {
                dockerfile: "Dockerfile",
            },
            env: BTreeMap::from([("PORT", port.to_string())]),
            http_service: FlyHttpService {
                internal_port: port,
                force_https: true,
                auto_stop_machines: "stop",
                auto_start_machines: true,
                min_machines_running: 0,
            },
        }
    }
}

/// Image reference pushed by CI; local-only without a GitHub handle.
fn image_reference(ctx: &ResolvedContext) -> String {
    match ctx.config().github_user() {
        Some(owner) => format!("ghcr.io/{}/{}:latest", slug(owner), ctx.slug()),
        None => format!("{}:latest", ctx.slug()),
    }
}

// ── Kubernetes ───────────────────────────────────────────────────────────────

/// Deployment followed by its Service, as two YAML documents.
fn kubernetes(ctx: &ResolvedContext) -> KindleResult<String> {
    let deployment = to_yaml(K8S_MANIFEST, &Manifest::deployment(ctx))?;
    let service = to_yaml(K8S_MANIFEST, &Manifest::service(ctx))?;
    Ok(format!("{deployment}---\n{service}"))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest<S> {
    api_version: &'static str,
    kind: &'static str,
    metadata: Metadata,
    spec: S,
}

#[derive(Serialize)]
struct Metadata {
    name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    labels: BTreeMap<&'static str, String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentSpec {
    replicas: u32,
    selector: Selector,
    template: PodTemplate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Selector {
    match_labels: BTreeMap<&'static str, String>,
}

#[derive(Serialize)]
struct PodTemplate {
    metadata: Metadata,
    spec: PodSpec,
}

#[derive(Serialize)]
struct PodSpec {
    containers: Vec<Container>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Container {
    name: String,
    image: String,
    ports: Vec<ContainerPort>,
    env: Vec<EnvVar>,
    readiness_probe: Probe,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContainerPort {
    container_port: u16,
}

#[derive(Serialize)]
struct EnvVar {
    name: &'static str,
    value: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Probe {
    tcp_socket: TcpSocket,
}

#[derive(Serialize)]
struct TcpSocket {
    port: u16,
}

#[derive(Serialize)]
struct ServiceSpec {
    selector: BTreeMap<&'static str, String>,
    ports: Vec<ServicePort>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServicePort {
    port: u16,
    target_port: u16,
}

fn app_label(ctx: &ResolvedContext) -> BTreeMap<&'static str, String> {
    BTreeMap::from([("app", ctx.slug().to_string())])
}

impl Manifest<DeploymentSpec> {
    fn deployment(ctx: &ResolvedContext) -> Self {
        let port = ctx.ports().application;
        let name = ctx.slug().to_string();
        Self {
            api_version: "apps/v1",
            kind: "Deployment",
            metadata: Metadata {
                name: name.clone(),
                labels: app_label(ctx),
            },
            spec: DeploymentSpec {
                replicas: 1,
                selector: Selector {
                    match_labels: app_label(ctx),
                },
                template: PodTemplate {
                    metadata: Metadata {
                        name: name.clone(),
                        labels: app_label(ctx),
                    },
                    spec: PodSpec {
                        containers: vec![Container {
                            name,
                            image: image_reference(ctx),
                            ports: vec![ContainerPort {
                                container_port: port,
                            }],
                            env: vec![EnvVar {
                                name: "PORT",
                                value: port.to_string(),
                            }],
                            readiness_probe: Probe {
                                tcp_socket: TcpSocket { port },
                            },
                        }],
                    },
                },
            },
        }
    }
}

impl Manifest<ServiceSpec> {
    fn service(ctx: &ResolvedContext) -> Self {
        Self {
            api_version: "v1",
            kind: "Service",
            metadata: Metadata {
                name: ctx.slug().to_string(),
                labels: BTreeMap::new(),
            },
            spec: ServiceSpec {
                selector: app_label(ctx),
                ports: vec![ServicePort {
                    port: 80,
                    target_port: ctx.ports().application,
                }],
            },
        }
    }
}
