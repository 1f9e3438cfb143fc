use crate::model::form::TaskForm;
use crate::model::task::Task;
use crate::model::trello::Card;

const PRIORITY_PREFIX: &str = "Prioritet: ";

/// Build the task to send to Trello from a submitted form.
///
/// Cards have no priority field, so the priority is appended to the
/// description instead. Other form fields stay on the form.
pub fn form_to_task(form: &TaskForm) -> Task {
    let mut description = form.description.clone().unwrap_or_default();

    if let Some(priority) = &form.priority {
        if !description.is_empty() {
            description.push_str("\n\n");
        }
        description.push_str(PRIORITY_PREFIX);
        description.push_str(priority);
    }

    Task::new(form.title.clone(), description)
}

/// Display mapping for cards read back from a list: id, name, desc and url only.
pub fn card_to_task(card: Card) -> Task {
    Task {
        id: Some(card.id),
        name: card.name,
        description: card.description,
        url: card.url,
        ..Task::default()
    }
}

/// Attach the identifiers of a freshly created card to the task it came from.
pub fn link_created_card(mut task: Task, card: Card) -> Task {
    task.id = Some(card.id.clone());
    task.card_id = Some(card.id);
    task.list_id = card.list_id;
    task.board_id = card.board_id;
    task.url = card.url.or(card.short_url);
    task
}
