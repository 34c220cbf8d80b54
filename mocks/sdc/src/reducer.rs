//! Catalog state, actions and reducer.
//!
//! Every mutating request becomes a [`CatalogCommand`] tagged with a request
//! id. The reducer applies it under the store's write lock and answers with
//! a [`CatalogAction::Completed`] carrying the same id, which the waiting
//! handler turns into an HTTP response.

use crate::catalog::{
    Artifact, ArtifactUploaded, ComponentInstance, DistributionEvent, DistributionSummary, Input,
    PropertyDefinition, Resource, ResourceInstanceRequest, ServiceDistributions,
};
use crate::environment::CatalogEnvironment;
use crate::error::SdcError;
use crate::fixtures;
use crate::lifecycle::{
    transition_resource, DistributionStatus, LifecycleState, ResourceAction, VersionAction,
    VersionStatus,
};
use crate::onboarding::{
    ArtifactUploadResult, ArtifactValidationResult, CreatedItem, CsarCreateResult, DEFAULT_OWNER,
    Empty, ImportStructure, NewVendor, NewVsp, ValidationData, Vendor, Version, Vsp,
};
use platform_mocks_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use std::sync::Arc;
use uuid::Uuid;

/// Resource type whose instances are tracked inside a service.
const VF_RESOURCE_TYPE: &str = "VF";

/// The whole dataset of the catalog mock.
#[derive(Debug, Clone)]
pub struct CatalogState {
    /// Vendor license models
    pub vendors: Vec<Vendor>,
    /// Vendor software products
    pub vsps: Vec<Vsp>,
    /// Resources and services
    pub resources: Vec<Resource>,
    /// Reference distribution notifications, never reset
    pub distribution_events: Arc<[DistributionEvent]>,
}

impl CatalogState {
    /// Seeded dataset.
    #[must_use]
    pub fn seeded(distribution_events: Vec<DistributionEvent>) -> Self {
        Self {
            vendors: fixtures::vendors(),
            vsps: fixtures::vsps(),
            resources: fixtures::resources(),
            distribution_events: distribution_events.into(),
        }
    }

    /// Restore vendors, software products and resources to their seed.
    pub fn reseed(&mut self) {
        self.vendors = fixtures::vendors();
        self.vsps = fixtures::vsps();
        self.resources = fixtures::resources();
    }

    /// Versions of a vendor or, failing that, of a software product.
    ///
    /// # Errors
    ///
    /// [`SdcError::ItemNotFound`] when neither matches.
    pub fn item_versions(&self, item_id: &str) -> Result<&[Version], SdcError> {
        self.vendors
            .iter()
            .find(|v| v.id == item_id)
            .map(|v| v.versions.as_slice())
            .or_else(|| {
                self.vsps
                    .iter()
                    .find(|v| v.id == item_id)
                    .map(|v| v.versions.as_slice())
            })
            .ok_or(SdcError::ItemNotFound)
    }

    /// One version of a vendor or software product.
    ///
    /// # Errors
    ///
    /// [`SdcError::ItemNotFound`] when no item carries both identifiers.
    pub fn item_version(&self, item_id: &str, version_id: &str) -> Result<&Version, SdcError> {
        let vendor_versions = self
            .vendors
            .iter()
            .filter(|v| v.id == item_id)
            .flat_map(|v| v.versions.iter());
        let vsp_versions = self
            .vsps
            .iter()
            .filter(|v| v.id == item_id)
            .flat_map(|v| v.versions.iter());

        vendor_versions
            .chain(vsp_versions)
            .find(|version| version.id == version_id)
            .ok_or(SdcError::ItemNotFound)
    }

    /// A software product and one of its versions.
    ///
    /// # Errors
    ///
    /// [`SdcError::ItemNotFound`] or [`SdcError::VersionNotFound`], in that order.
    pub fn vsp_version(&self, vsp_id: &str, version_id: &str) -> Result<(&Vsp, &Version), SdcError> {
        let (i, j) = self.vsp_position(vsp_id, version_id)?;
        Ok((&self.vsps[i], &self.vsps[i].versions[j]))
    }

    fn vsp_position(&self, vsp_id: &str, version_id: &str) -> Result<(usize, usize), SdcError> {
        let i = self
            .vsps
            .iter()
            .position(|v| v.id == vsp_id)
            .ok_or(SdcError::ItemNotFound)?;
        let j = self.vsps[i]
            .versions
            .iter()
            .position(|v| v.id == version_id)
            .ok_or(SdcError::VersionNotFound)?;
        Ok((i, j))
    }

    fn vendor_position(&self, vendor_id: &str, version_id: &str) -> Result<(usize, usize), SdcError> {
        let i = self
            .vendors
            .iter()
            .position(|v| v.id == vendor_id)
            .ok_or(SdcError::VendorNotFound)?;
        let j = self.vendors[i]
            .versions
            .iter()
            .position(|v| v.id == version_id)
            .ok_or(SdcError::VersionNotFound)?;
        Ok((i, j))
    }

    /// Resource or service by its `uniqueId`.
    ///
    /// # Errors
    ///
    /// [`SdcError::ResourceNotFound`] when nothing matches.
    pub fn resource(&self, unique_id: &str) -> Result<&Resource, SdcError> {
        self.resources
            .iter()
            .find(|r| r.unique_id == unique_id)
            .ok_or(SdcError::ResourceNotFound)
    }

    fn resource_position(&self, unique_id: &str) -> Result<usize, SdcError> {
        self.resources
            .iter()
            .position(|r| r.unique_id == unique_id)
            .ok_or(SdcError::ResourceNotFound)
    }

    /// Whether some resource or service was given `distribution_id`.
    #[must_use]
    pub fn has_distribution(&self, distribution_id: &str) -> bool {
        self.resources
            .iter()
            .any(|r| r.distribution_id == distribution_id)
    }
}

/// Mutations of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogCommand {
    /// Restore the seed
    Reset,
    /// Onboard a vendor license model
    CreateVendor(NewVendor),
    /// Apply an action to a vendor version
    SubmitVendorVersion {
        /// Vendor id
        vendor_id: String,
        /// Version id
        version_id: String,
        /// Action token
        action: String,
    },
    /// Onboard a software product
    CreateVsp(NewVsp),
    /// Attach an uploaded network package to a draft version
    UploadPackage {
        /// Product id
        vsp_id: String,
        /// Version id
        version_id: String,
        /// File name without extension
        package_name: String,
        /// File extension
        extension: String,
    },
    /// Validate the uploaded package
    ProcessPackage {
        /// Product id
        vsp_id: String,
        /// Version id
        version_id: String,
    },
    /// `Submit` or `Create_Package` on a product version
    VspVersionAction {
        /// Product id
        vsp_id: String,
        /// Version id
        version_id: String,
        /// Action token
        action: String,
    },
    /// `Commit` through the generic items endpoint
    ItemVersionAction {
        /// Item id
        item_id: String,
        /// Version id
        version_id: String,
        /// Action token
        action: String,
    },
    /// Create a resource or service
    CreateResource(Box<Resource>),
    /// Apply a lifecycle action to a resource or service
    ResourceLifecycle {
        /// `uniqueId` of the resource
        unique_id: String,
        /// Action path segment
        action: String,
    },
    /// Place a resource into a service
    AddResourceInstance {
        /// `uniqueId` of the service
        service_id: String,
        /// The resource to place
        request: ResourceInstanceRequest,
    },
    /// Report the distribution of a service, assigning an id on first query
    QueryDistribution {
        /// `uuid` of the service
        service_uuid: String,
    },
    /// Upload an artifact onto a component instance
    AddArtifact {
        /// `uniqueId` of the service
        service_id: String,
        /// `uniqueId` of the component instance
        instance_id: String,
        /// The artifact
        artifact: Artifact,
    },
    /// Declare properties
    AddProperties {
        /// `uniqueId` of the resource
        resource_id: String,
        /// Declared properties
        properties: Vec<PropertyDefinition>,
    },
    /// Declare an input
    AddInput {
        /// `uniqueId` of the resource
        resource_id: String,
        /// The input
        input: Input,
    },
}

/// Successful outcome of a [`CatalogCommand`].
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogReply {
    /// Dataset re-seeded
    Reset,
    /// Applied, nothing to report
    Accepted,
    /// Vendor or product created
    ItemCreated(CreatedItem),
    /// Network package uploaded
    PackageUploaded(ArtifactUploadResult),
    /// Network package validated
    PackageProcessed(ArtifactValidationResult),
    /// Package descriptor of a certified product
    PackageCreated(CsarCreateResult),
    /// Resource or service after the command
    Resource {
        /// The record
        resource: Box<Resource>,
        /// Whether to answer `201 Created`
        created: bool,
    },
    /// Distribution summary of a service
    Distribution(ServiceDistributions),
    /// Artifact stored on a component instance
    ArtifactUploaded(ArtifactUploaded),
    /// Inputs of a resource after the command
    Inputs(Vec<Input>),
}

/// Actions of the catalog store.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    /// A request to mutate the dataset
    Command {
        /// Correlates the completion with the waiting request
        request_id: Uuid,
        /// What to do
        command: CatalogCommand,
    },
    /// Outcome of a command, routed to the waiting request
    Completed {
        /// Id of the originating command
        request_id: Uuid,
        /// Reply or rejection
        outcome: Result<CatalogReply, SdcError>,
    },
}

/// Applies catalog commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogReducer;

impl Reducer for CatalogReducer {
    type State = CatalogState;
    type Action = CatalogAction;
    type Environment = CatalogEnvironment;

    fn reduce(
        &self,
        state: &mut CatalogState,
        action: CatalogAction,
        env: &CatalogEnvironment,
    ) -> SmallVec<[Effect<CatalogAction>; 4]> {
        match action {
            CatalogAction::Command {
                request_id,
                command,
            } => {
                let outcome = apply(state, command, env);
                if let Err(err) = &outcome {
                    tracing::debug!(%request_id, error = %err, "Command rejected");
                }
                smallvec![Effect::reply(CatalogAction::Completed {
                    request_id,
                    outcome
                })]
            },
            CatalogAction::Completed { .. } => SmallVec::new(),
        }
    }
}

fn apply(
    state: &mut CatalogState,
    command: CatalogCommand,
    env: &CatalogEnvironment,
) -> Result<CatalogReply, SdcError> {
    match command {
        CatalogCommand::Reset => {
            state.reseed();
            tracing::info!("Catalog dataset reset");
            Ok(CatalogReply::Reset)
        },
        CatalogCommand::CreateVendor(new_vendor) => Ok(create_vendor(state, new_vendor, env)),
        CatalogCommand::SubmitVendorVersion {
            vendor_id,
            version_id,
            action,
        } => submit_vendor_version(state, &vendor_id, &version_id, &action),
        CatalogCommand::CreateVsp(new_vsp) => Ok(create_vsp(state, new_vsp, env)),
        CatalogCommand::UploadPackage {
            vsp_id,
            version_id,
            package_name,
            extension,
        } => upload_package(state, &vsp_id, &version_id, package_name, extension),
        CatalogCommand::ProcessPackage { vsp_id, version_id } => {
            process_package(state, &vsp_id, &version_id)
        },
        CatalogCommand::VspVersionAction {
            vsp_id,
            version_id,
            action,
        } => vsp_version_action(state, &vsp_id, &version_id, &action),
        CatalogCommand::ItemVersionAction {
            item_id,
            version_id,
            action,
        } => item_version_action(state, &item_id, &version_id, &action),
        CatalogCommand::CreateResource(resource) => create_resource(state, *resource, env),
        CatalogCommand::ResourceLifecycle { unique_id, action } => {
            resource_lifecycle(state, &unique_id, &action)
        },
        CatalogCommand::AddResourceInstance {
            service_id,
            request,
        } => add_resource_instance(state, &service_id, &request, env),
        CatalogCommand::QueryDistribution { service_uuid } => {
            query_distribution(state, &service_uuid, env)
        },
        CatalogCommand::AddArtifact {
            service_id,
            instance_id,
            artifact,
        } => add_artifact(state, &service_id, &instance_id, artifact),
        CatalogCommand::AddProperties {
            resource_id,
            properties,
        } => {
            let i = state.resource_position(&resource_id)?;
            state.resources[i]
                .properties
                .extend(properties.into_iter().map(Into::into));
            Ok(CatalogReply::Accepted)
        },
        CatalogCommand::AddInput { resource_id, input } => {
            let i = state.resource_position(&resource_id)?;
            let inputs = &mut state.resources[i].inputs;
            inputs.push(input);
            Ok(CatalogReply::Inputs(inputs.clone()))
        },
    }
}

fn create_vendor(
    state: &mut CatalogState,
    new_vendor: NewVendor,
    env: &CatalogEnvironment,
) -> CatalogReply {
    let version = Version::initial(env.next_id(), env.now_millis());
    let item_id = env.next_id();
    let created = CreatedItem::new(item_id.clone(), &version);

    tracing::info!(vendor_id = %item_id, name = %new_vendor.vendor_name, "Vendor created");
    state.vendors.push(Vendor {
        id: item_id,
        kind: "vlm".to_string(),
        name: new_vendor.vendor_name,
        description: new_vendor.description,
        owner: DEFAULT_OWNER.to_string(),
        status: "ACTIVE".to_string(),
        properties: Empty {},
        versions: vec![version],
    });
    CatalogReply::ItemCreated(created)
}

/// `Submit` certifies a vendor version from any status.
fn submit_vendor_version(
    state: &mut CatalogState,
    vendor_id: &str,
    version_id: &str,
    action: &str,
) -> Result<CatalogReply, SdcError> {
    let (i, j) = state.vendor_position(vendor_id, version_id)?;
    if VersionAction::from_token(action) != Some(VersionAction::Submit) {
        return Err(SdcError::UnknownAction);
    }
    state.vendors[i].versions[j].certify();
    Ok(CatalogReply::Accepted)
}

fn create_vsp(state: &mut CatalogState, new_vsp: NewVsp, env: &CatalogEnvironment) -> CatalogReply {
    let version = Version::initial(env.next_id(), env.now_millis());
    let item_id = env.next_id();
    let created = CreatedItem::new(item_id.clone(), &version);

    tracing::info!(vsp_id = %item_id, name = %new_vsp.name, "Software product created");
    state.vsps.push(Vsp {
        id: item_id,
        icon: "icon".to_string(),
        onboarding_method: "NetworkPackage".to_string(),
        name: new_vsp.name,
        description: new_vsp.description,
        owner: DEFAULT_OWNER.to_string(),
        status: "ACTIVE".to_string(),
        vendor_name: new_vsp.vendor_name,
        vendor_id: new_vsp.vendor_id,
        category: "resourceNewCategory.generic".to_string(),
        sub_category: "resourceNewCategory.generic.abstract".to_string(),
        candidate_onboarding_origin: String::new(),
        onboarding_origin: String::new(),
        network_package_name: String::new(),
        validation_data: ValidationData::default(),
        versions: vec![version],
    });
    CatalogReply::ItemCreated(created)
}

fn upload_package(
    state: &mut CatalogState,
    vsp_id: &str,
    version_id: &str,
    package_name: String,
    extension: String,
) -> Result<CatalogReply, SdcError> {
    let (i, j) = state.vsp_position(vsp_id, version_id)?;
    let vsp = &mut state.vsps[i];
    let next = vsp.versions[j].real_status.advance(VersionAction::Upload)?;

    vsp.versions[j].real_status = next;
    vsp.network_package_name.clone_from(&package_name);
    vsp.candidate_onboarding_origin.clone_from(&extension);

    Ok(CatalogReply::PackageUploaded(ArtifactUploadResult {
        errors: Empty {},
        status: "Success".to_string(),
        onboarding_origin: extension,
        network_package_name: package_name,
    }))
}

fn process_package(
    state: &mut CatalogState,
    vsp_id: &str,
    version_id: &str,
) -> Result<CatalogReply, SdcError> {
    let (i, j) = state.vsp_position(vsp_id, version_id)?;
    let vsp = &mut state.vsps[i];
    let next = vsp.versions[j].real_status.advance(VersionAction::Validate)?;

    vsp.versions[j].real_status = next;
    vsp.versions[j].state.dirty = true;
    vsp.onboarding_origin.clone_from(&vsp.candidate_onboarding_origin);
    vsp.validation_data = ValidationData {
        import_structure: ImportStructure {
            heat: "Yes".to_string(),
        },
    };

    Ok(CatalogReply::PackageProcessed(ArtifactValidationResult {
        errors: Empty {},
        status: "Success".to_string(),
        file_names: vec![
            "base_ubuntu16.env".to_string(),
            "base_ubuntu16.yaml".to_string(),
        ],
    }))
}

fn vsp_version_action(
    state: &mut CatalogState,
    vsp_id: &str,
    version_id: &str,
    action: &str,
) -> Result<CatalogReply, SdcError> {
    let (i, j) = state.vsp_position(vsp_id, version_id)?;
    let vsp = &mut state.vsps[i];

    match VersionAction::from_token(action) {
        Some(VersionAction::Submit) => {
            vsp.versions[j].real_status.advance(VersionAction::Submit)?;
            vsp.versions[j].certify();
            tracing::info!(vsp_id, version_id, "Software product certified");
            Ok(CatalogReply::Accepted)
        },
        Some(VersionAction::CreatePackage) => {
            vsp.versions[j]
                .real_status
                .advance(VersionAction::CreatePackage)?;
            Ok(CatalogReply::PackageCreated(CsarCreateResult::of(
                vsp,
                &vsp.versions[j],
            )))
        },
        _ => Err(SdcError::UnknownAction),
    }
}

/// Only software products can be committed through the items endpoint.
fn item_version_action(
    state: &mut CatalogState,
    item_id: &str,
    version_id: &str,
    action: &str,
) -> Result<CatalogReply, SdcError> {
    let (i, j) = state
        .vsp_position(item_id, version_id)
        .map_err(|_| SdcError::ItemNotFound)?;
    if VersionAction::from_token(action) != Some(VersionAction::Commit) {
        return Err(SdcError::UnknownAction);
    }

    let version = &mut state.vsps[i].versions[j];
    version.real_status = version.real_status.advance(VersionAction::Commit)?;
    version.state.dirty = false;
    Ok(CatalogReply::Accepted)
}

fn create_resource(
    state: &mut CatalogState,
    mut resource: Resource,
    env: &CatalogEnvironment,
) -> Result<CatalogReply, SdcError> {
    if state.resources.iter().any(|r| r.same_natural_key(&resource)) {
        return Err(SdcError::ResourceExists);
    }

    resource.id = env.next_id();
    resource.invariant_id = env.next_id();
    resource.unique_id = env.next_id();
    resource.version = "0.1".to_string();
    resource.lifecycle_state = LifecycleState::NotCertifiedCheckout;
    resource.distribution_status = DistributionStatus::DistributionNotApproved;

    tracing::info!(
        unique_id = %resource.unique_id,
        name = %resource.name,
        service = resource.is_service(),
        "Catalog record created"
    );
    state.resources.push(resource.clone());
    Ok(CatalogReply::Resource {
        resource: Box::new(resource),
        created: true,
    })
}

fn resource_lifecycle(
    state: &mut CatalogState,
    unique_id: &str,
    action: &str,
) -> Result<CatalogReply, SdcError> {
    let i = state.resource_position(unique_id)?;
    let action: ResourceAction = action.parse()?;
    let resource = &mut state.resources[i];

    let transition =
        transition_resource(resource.lifecycle_state, resource.distribution_status, action)?;
    resource.lifecycle_state = transition.lifecycle;
    resource.distribution_status = transition.distribution;
    if transition.certifies_version {
        resource.version = "1.0".to_string();
    }

    tracing::info!(
        unique_id,
        lifecycle = ?resource.lifecycle_state,
        distribution = ?resource.distribution_status,
        "Lifecycle transition applied"
    );
    Ok(CatalogReply::Resource {
        resource: Box::new(resource.clone()),
        created: transition.created,
    })
}

fn add_resource_instance(
    state: &mut CatalogState,
    service_id: &str,
    request: &ResourceInstanceRequest,
    env: &CatalogEnvironment,
) -> Result<CatalogReply, SdcError> {
    let i = state.resource_position(service_id)?;
    if state.resources[i].lifecycle_state != LifecycleState::NotCertifiedCheckout {
        return Err(SdcError::BadAction);
    }
    let origin = state
        .resources
        .iter()
        .find(|r| r.matches_instance_request(request))
        .ok_or(SdcError::BadAction)?;

    if origin.resource_type == VF_RESOURCE_TYPE {
        let instance = ComponentInstance {
            unique_id: env.next_id(),
            name: request.name.clone(),
            component_name: request.name.clone(),
            origin_type: VF_RESOURCE_TYPE.to_string(),
            component_version: "1.0".to_string(),
            deployment_artifacts: Vec::new(),
        };
        state.resources[i].component_instances.push(instance);
    }

    Ok(CatalogReply::Resource {
        resource: Box::new(state.resources[i].clone()),
        created: true,
    })
}

fn query_distribution(
    state: &mut CatalogState,
    service_uuid: &str,
    env: &CatalogEnvironment,
) -> Result<CatalogReply, SdcError> {
    let service = state
        .resources
        .iter_mut()
        .find(|r| r.id == service_uuid)
        .ok_or(SdcError::ResourceNotFound)?;

    let summary = if service.distribution_status == DistributionStatus::Distributed {
        if service.distribution_id.is_empty() {
            service.distribution_id = env.next_id();
        }
        DistributionSummary::distributed(service.distribution_id.clone())
    } else {
        DistributionSummary::default()
    };

    Ok(CatalogReply::Distribution(ServiceDistributions {
        distribution_status_of_service_list: vec![summary],
    }))
}

fn add_artifact(
    state: &mut CatalogState,
    service_id: &str,
    instance_id: &str,
    artifact: Artifact,
) -> Result<CatalogReply, SdcError> {
    let i = state.resource_position(service_id)?;
    let service = &mut state.resources[i];
    if service.lifecycle_state != LifecycleState::NotCertifiedCheckout {
        return Err(SdcError::BadAction);
    }
    let instance = service
        .component_instances
        .iter_mut()
        .find(|c| c.unique_id == instance_id)
        .ok_or(SdcError::BadAction)?;

    let uploaded = ArtifactUploaded::from(&artifact);
    instance.deployment_artifacts.push(artifact);
    Ok(CatalogReply::ArtifactUploaded(uploaded))
}
