use std::fmt::{self, Display};

use crate::MessageId;

/// Who a transcript entry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The person typing into the form.
    User,
    /// The reply service.
    Bot,
}

/// The speaker of a turn being rendered. Bot turns always carry the
/// identifier used to find their message element later.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Speaker {
    /// A user turn.
    User,
    /// A bot turn, tagged with its message identifier.
    Bot(MessageId),
}

/// Image paths for the two avatars.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Avatars {
    /// Shown next to bot turns.
    pub bot: String,
    /// Shown next to user turns.
    pub user: String,
}

impl Default for Avatars {
    fn default() -> Self {
        Self {
            bot: "./assets/bot.svg".to_owned(),
            user: "./assets/user.svg".to_owned(),
        }
    }
}

/// A rendered transcript entry.
///
/// Hosts that render markup use the [`Display`] implementation; others can
/// read the structured fields directly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Turn {
    role: Role,
    text: String,
    avatar: String,
    id: Option<MessageId>,
}

impl Turn {
    /// Returns who this turn belongs to.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the literal text shown in the message container.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the avatar image path.
    #[inline]
    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    /// Returns the message identifier. Always `Some` for bot turns and
    /// `None` for user turns.
    #[inline]
    pub fn id(&self) -> Option<&MessageId> {
        self.id.as_ref()
    }
}

impl Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wrapper_class = match self.role {
            Role::User => "wrapper",
            Role::Bot => "wrapper ai",
        };
        writeln!(f, r#"<div class="{wrapper_class}">"#)?;
        writeln!(f, r#"  <div class="chat">"#)?;
        writeln!(f, r#"    <div class="profile">"#)?;
        writeln!(f, r#"      <img src="{}"/>"#, escape_html(&self.avatar))?;
        writeln!(f, r#"    </div>"#)?;
        match &self.id {
            Some(id) => write!(
                f,
                r#"    <div class="message" id="{}">"#,
                escape_html(id.as_str())
            )?,
            None => write!(f, r#"    <div class="message">"#)?,
        }
        writeln!(f, "{}</div>", escape_html(&self.text))?;
        writeln!(f, r#"  </div>"#)?;
        write!(f, r#"</div>"#)
    }
}

/// Builds the transcript entry for one side of a submission.
///
/// This is pure formatting: appending the turn to the transcript and
/// scrolling it into view is up to the caller.
pub fn render_turn(speaker: Speaker, text: &str, avatars: &Avatars) -> Turn {
    let (role, avatar, id) = match speaker {
        Speaker::User => (Role::User, &avatars.user, None),
        Speaker::Bot(id) => (Role::Bot, &avatars.bot, Some(id)),
    };
    Turn {
        role,
        text: text.to_owned(),
        avatar: avatar.clone(),
        id,
    }
}

/// Escapes HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_turn_has_no_id() {
        let turn = render_turn(Speaker::User, "hi", &Avatars::default());
        assert_eq!(turn.role(), Role::User);
        assert_eq!(turn.id(), None);
        assert_eq!(turn.avatar(), "./assets/user.svg");

        let markup = turn.to_string();
        assert!(markup.starts_with(r#"<div class="wrapper">"#));
        assert!(markup.contains(r#"<div class="message">hi</div>"#));
        assert!(!markup.contains("id="));
    }

    #[test]
    fn test_bot_turn_carries_id() {
        let id = MessageId::from_parts(1, 2);
        let turn =
            render_turn(Speaker::Bot(id.clone()), " ", &Avatars::default());
        assert_eq!(turn.role(), Role::Bot);
        assert_eq!(turn.id(), Some(&id));
        assert_eq!(turn.text(), " ");

        let markup = turn.to_string();
        assert!(markup.starts_with(r#"<div class="wrapper ai">"#));
        assert!(markup.contains(r#"<img src="./assets/bot.svg"/>"#));
        assert!(markup.contains(&format!(
            r#"<div class="message" id="{id}"> </div>"#
        )));
    }

    #[test]
    fn test_text_is_escaped() {
        let avatars = Avatars {
            bot: "b.svg".to_owned(),
            user: "u\".svg".to_owned(),
        };
        let turn = render_turn(Speaker::User, "<b>&'", &avatars);
        assert_eq!(turn.text(), "<b>&'");

        let markup = turn.to_string();
        assert!(markup.contains("&lt;b&gt;&amp;&#x27;</div>"));
        assert!(markup.contains(r#"<img src="u&quot;.svg"/>"#));
    }
}
