//! Chat list built from a user's messages.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::foundation::{PropertyId, Timestamp, UserId};

use super::Message;

/// One conversation in the user's inbox.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub property_id: PropertyId,
    /// The other participant.
    pub user_id: UserId,
    pub property_title: String,
    pub last_message: String,
    pub last_message_date: Timestamp,
    pub unread_count: usize,
}

/// Groups `messages` by (listing, counterpart).
///
/// `title_of` resolves listing titles; conversations about listings it
/// cannot resolve are dropped. Most recent conversation first.
pub fn summarize_chats<F>(user_id: UserId, messages: &[Message], title_of: F) -> Vec<ChatSummary>
where
    F: Fn(PropertyId) -> Option<String>,
{
    let mut groups: HashMap<(PropertyId, UserId), Vec<&Message>> = HashMap::new();
    for message in messages {
        if message.sender_id != user_id && message.receiver_id != user_id {
            continue;
        }
        groups
            .entry((message.property_id, message.counterpart(user_id)))
            .or_default()
            .push(message);
    }

    let mut chats: Vec<ChatSummary> = groups
        .into_iter()
        .filter_map(|((property_id, other), group)| {
            let title = title_of(property_id)?;
            let last = group.iter().max_by_key(|m| (m.created_at, m.id))?;
            let unread_count = group
                .iter()
                .filter(|m| m.receiver_id == user_id && !m.is_read)
                .count();
            Some(ChatSummary {
                property_id,
                user_id: other,
                property_title: title,
                last_message: last.content.clone(),
                last_message_date: last.created_at,
                unread_count,
            })
        })
        .collect();

    chats.sort_by(|a, b| b.last_message_date.cmp(&a.last_message_date));
    chats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::MessageId;

    fn msg(id: i32, property: i32, from: i32, to: i32, minutes_ago: i64, read: bool) -> Message {
        Message {
            id: MessageId::from_raw(id),
            property_id: PropertyId::from_raw(property),
            sender_id: UserId::from_raw(from),
            receiver_id: UserId::from_raw(to),
            content: format!("m{}", id),
            created_at: Timestamp::from_datetime(
                *Timestamp::now().as_datetime() - chrono::Duration::minutes(minutes_ago),
            ),
            is_read: read,
        }
    }

    #[test]
    fn messages_are_grouped_per_listing_and_counterpart() {
        let me = UserId::from_raw(1);
        let messages = vec![
            msg(1, 10, 2, 1, 30, false),
            msg(2, 10, 1, 2, 20, false),
            msg(3, 10, 2, 1, 10, false),
            msg(4, 11, 3, 1, 5, true),
        ];
        let chats = summarize_chats(me, &messages, |id| Some(format!("Listing {}", id)));

        assert_eq!(chats.len(), 2);
        assert_eq!(chats[0].property_id, PropertyId::from_raw(11));
        assert_eq!(chats[0].unread_count, 0);

        let with_two = &chats[1];
        assert_eq!(with_two.user_id, UserId::from_raw(2));
        assert_eq!(with_two.last_message, "m3");
        // Only messages received by me count as unread.
        assert_eq!(with_two.unread_count, 2);
    }

    #[test]
    fn chats_about_deleted_listings_are_skipped() {
        let me = UserId::from_raw(1);
        let messages = vec![msg(1, 10, 2, 1, 1, false)];
        assert!(summarize_chats(me, &messages, |_| None).is_empty());
    }
}
