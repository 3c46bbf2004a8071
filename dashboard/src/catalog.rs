//! The eleven dashboard mutations, described as data.
//!
//! Every entry feeds the same execution protocol in
//! [`crate::mutation::MutationEngine`]; nothing here special-cases a step.
//! Operations with a cheap, trivially revertible preview carry an optimistic
//! transform. Row-creating operations do not: no id exists to insert under
//! until the server answers, so they merge the authoritative response
//! instead. Profile updates write only on confirmed success and refetch only
//! on failure.

use crate::mutation::MutationKind;
use crate::mutation::MutationSpec;
use crate::mutation::OptimisticSpec;
use crate::mutation::SettlePolicy;
use crate::rollback::MutationScope;
use fuelmap_owner_api::ApiResult;
use fuelmap_owner_api::Broadcast;
use fuelmap_owner_api::ClaimStationRequest;
use fuelmap_owner_api::CreateBroadcastRequest;
use fuelmap_owner_api::DashboardTransport;
use fuelmap_owner_api::ProfilePatch;
use fuelmap_owner_api::ScheduleBroadcastRequest;
use fuelmap_owner_api::StationOwner;
use fuelmap_owner_api::UpdateBroadcastRequest;
use fuelmap_owner_api::UpdateStationRequest;
use futures::future::BoxFuture;

pub(crate) fn claim_station() -> MutationSpec<ClaimStationRequest, ()> {
    MutationSpec {
        kind: MutationKind::ClaimStation,
        request: claim_station_request,
        optimistic: None,
        on_success: None,
        settle: SettlePolicy::Invalidate,
    }
}

pub(crate) fn unclaim_station() -> MutationSpec<String, ()> {
    MutationSpec {
        kind: MutationKind::UnclaimStation,
        request: unclaim_station_request,
        optimistic: Some(OptimisticSpec {
            apply: |snapshot, station_id| snapshot.stations.retain(|s| s.id != *station_id),
            scope: |station_id| MutationScope::Station(station_id.clone()),
        }),
        on_success: None,
        settle: SettlePolicy::Invalidate,
    }
}

pub(crate) fn update_station() -> MutationSpec<UpdateStationRequest, ()> {
    MutationSpec {
        kind: MutationKind::UpdateStation,
        request: update_station_request,
        optimistic: Some(OptimisticSpec {
            apply: |snapshot, args| {
                if let Some(station) = snapshot.station_mut(&args.station_id) {
                    args.patch.apply_to(station);
                }
            },
            scope: |args| MutationScope::Station(args.station_id.clone()),
        }),
        on_success: None,
        settle: SettlePolicy::Invalidate,
    }
}

pub(crate) fn create_broadcast() -> MutationSpec<CreateBroadcastRequest, Broadcast> {
    MutationSpec {
        kind: MutationKind::CreateBroadcast,
        request: create_broadcast_request,
        optimistic: None,
        // A refetch racing this request may have landed the row already.
        on_success: Some(|snapshot, created| {
            if snapshot.broadcast(&created.id).is_none() {
                snapshot.broadcasts.insert(0, created.clone());
            }
        }),
        settle: SettlePolicy::None,
    }
}

pub(crate) fn update_broadcast() -> MutationSpec<UpdateBroadcastRequest, ()> {
    MutationSpec {
        kind: MutationKind::UpdateBroadcast,
        request: update_broadcast_request,
        optimistic: Some(OptimisticSpec {
            apply: |snapshot, args| {
                if let Some(broadcast) = snapshot.broadcast_mut(&args.broadcast_id) {
                    args.patch.apply_to(broadcast);
                }
            },
            scope: |args| MutationScope::Broadcast(args.broadcast_id.clone()),
        }),
        on_success: None,
        settle: SettlePolicy::Invalidate,
    }
}

pub(crate) fn delete_broadcast() -> MutationSpec<String, ()> {
    MutationSpec {
        kind: MutationKind::DeleteBroadcast,
        request: delete_broadcast_request,
        optimistic: Some(OptimisticSpec {
            apply: |snapshot, broadcast_id| snapshot.broadcasts.retain(|b| b.id != *broadcast_id),
            scope: |broadcast_id| MutationScope::Broadcast(broadcast_id.clone()),
        }),
        on_success: None,
        settle: SettlePolicy::Invalidate,
    }
}

pub(crate) fn send_broadcast() -> MutationSpec<String, ()> {
    MutationSpec {
        kind: MutationKind::SendBroadcast,
        request: send_broadcast_request,
        optimistic: Some(OptimisticSpec {
            apply: |snapshot, broadcast_id| {
                if let Some(broadcast) = snapshot.broadcast_mut(broadcast_id) {
                    broadcast.mark_sent();
                }
            },
            scope: |broadcast_id| MutationScope::Broadcast(broadcast_id.clone()),
        }),
        on_success: None,
        settle: SettlePolicy::Invalidate,
    }
}

pub(crate) fn schedule_broadcast() -> MutationSpec<ScheduleBroadcastRequest, ()> {
    MutationSpec {
        kind: MutationKind::ScheduleBroadcast,
        request: schedule_broadcast_request,
        optimistic: Some(OptimisticSpec {
            apply: |snapshot, args| {
                if let Some(broadcast) = snapshot.broadcast_mut(&args.broadcast_id) {
                    broadcast.mark_scheduled(args.scheduled_for);
                }
            },
            scope: |args| MutationScope::Broadcast(args.broadcast_id.clone()),
        }),
        on_success: None,
        settle: SettlePolicy::Invalidate,
    }
}

pub(crate) fn cancel_broadcast() -> MutationSpec<String, ()> {
    MutationSpec {
        kind: MutationKind::CancelBroadcast,
        request: cancel_broadcast_request,
        optimistic: Some(OptimisticSpec {
            apply: |snapshot, broadcast_id| {
                if let Some(broadcast) = snapshot.broadcast_mut(broadcast_id) {
                    broadcast.mark_cancelled();
                }
            },
            scope: |broadcast_id| MutationScope::Broadcast(broadcast_id.clone()),
        }),
        on_success: None,
        settle: SettlePolicy::Invalidate,
    }
}

pub(crate) fn duplicate_broadcast() -> MutationSpec<String, Broadcast> {
    MutationSpec {
        kind: MutationKind::DuplicateBroadcast,
        request: duplicate_broadcast_request,
        optimistic: None,
        // A refetch racing this request may have landed the copy already.
        on_success: Some(|snapshot, copy| {
            if snapshot.broadcast(&copy.id).is_none() {
                snapshot.broadcasts.insert(0, copy.clone());
            }
        }),
        settle: SettlePolicy::None,
    }
}

pub(crate) fn update_profile() -> MutationSpec<ProfilePatch, StationOwner> {
    MutationSpec {
        kind: MutationKind::UpdateProfile,
        request: update_profile_request,
        optimistic: None,
        on_success: Some(|snapshot, owner| snapshot.owner = Some(owner.clone())),
        settle: SettlePolicy::InvalidateOnFailure,
    }
}

fn claim_station_request(
    transport: &dyn DashboardTransport,
    args: ClaimStationRequest,
) -> BoxFuture<'_, ApiResult<()>> {
    transport.claim_station(args)
}

fn unclaim_station_request(
    transport: &dyn DashboardTransport,
    station_id: String,
) -> BoxFuture<'_, ApiResult<()>> {
    transport.unclaim_station(station_id)
}

fn update_station_request(
    transport: &dyn DashboardTransport,
    args: UpdateStationRequest,
) -> BoxFuture<'_, ApiResult<()>> {
    transport.update_station(args)
}

fn create_broadcast_request(
    transport: &dyn DashboardTransport,
    args: CreateBroadcastRequest,
) -> BoxFuture<'_, ApiResult<Broadcast>> {
    transport.create_broadcast(args)
}

fn update_broadcast_request(
    transport: &dyn DashboardTransport,
    args: UpdateBroadcastRequest,
) -> BoxFuture<'_, ApiResult<()>> {
    transport.update_broadcast(args)
}

fn delete_broadcast_request(
    transport: &dyn DashboardTransport,
    broadcast_id: String,
) -> BoxFuture<'_, ApiResult<()>> {
    transport.delete_broadcast(broadcast_id)
}

fn send_broadcast_request(
    transport: &dyn DashboardTransport,
    broadcast_id: String,
) -> BoxFuture<'_, ApiResult<()>> {
    transport.send_broadcast(broadcast_id)
}

fn schedule_broadcast_request(
    transport: &dyn DashboardTransport,
    args: ScheduleBroadcastRequest,
) -> BoxFuture<'_, ApiResult<()>> {
    transport.schedule_broadcast(args)
}

fn cancel_broadcast_request(
    transport: &dyn DashboardTransport,
    broadcast_id: String,
) -> BoxFuture<'_, ApiResult<()>> {
    transport.cancel_broadcast(broadcast_id)
}

fn duplicate_broadcast_request(
    transport: &dyn DashboardTransport,
    broadcast_id: String,
) -> BoxFuture<'_, ApiResult<Broadcast>> {
    transport.duplicate_broadcast(broadcast_id)
}

fn update_profile_request(
    transport: &dyn DashboardTransport,
    patch: ProfilePatch,
) -> BoxFuture<'_, ApiResult<StationOwner>> {
    transport.update_profile(patch)
}
