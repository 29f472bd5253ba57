use crate::domain::commands::events::CreateEventCommand;
use crate::domain::models::event::{Event as DomainEvent, EventRecord};
use shared::{CreateEventRequest, Event as SharedEvent, EventListResponse};

pub struct EventMapper;

impl EventMapper {
    /// Flatten a domain event into its wire form
    pub fn to_dto(event: &DomainEvent) -> SharedEvent {
        let record = EventRecord::from(event);
        SharedEvent {
            id: record.id,
            baby_id: record.baby_id,
            event_type: record.event_type,
            occurred_at: record.occurred_at,
            end_date: record.end_date,
            feeding_type: record.feeding_type,
            amount: record.amount,
            duration: record.duration,
            diaper_type: record.diaper_type,
            note: record.note,
        }
    }

    pub fn to_list_response(events: &[DomainEvent]) -> EventListResponse {
        EventListResponse {
            events: events.iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_create_command(baby_id: i64, request: CreateEventRequest) -> CreateEventCommand {
        CreateEventCommand {
            baby_id,
            event_type: request.event_type,
            occurred_at: request.occurred_at,
            end_date: request.end_date,
            feeding_type: request.feeding_type,
            amount: request.amount,
            duration: request.duration,
            diaper_type: request.diaper_type,
            note: request.note,
        }
    }
}
