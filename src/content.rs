//! Site Content
//!
//! The static copy shown on each tab of the page: schedule, venue, travel,
//! dress code, registry, RSVP link and wedding party. Defaults hold the
//! published copy; every field can be overridden from the `[site]` table of
//! the config file.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

/// Tabs of the page, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Main,
    Rsvp,
    Info,
    Party,
    Registry,
    GuestBook,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Main,
        Tab::Rsvp,
        Tab::Info,
        Tab::Party,
        Tab::Registry,
        Tab::GuestBook,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Tab::Main => "main",
            Tab::Rsvp => "rsvp",
            Tab::Info => "info",
            Tab::Party => "party",
            Tab::Registry => "registry",
            Tab::GuestBook => "guestbook",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Main => "Main",
            Tab::Rsvp => "RSVP",
            Tab::Info => "Info",
            Tab::Party => "Wedding Party",
            Tab::Registry => "Registry",
            Tab::GuestBook => "Guest Book",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Unknown tab slug
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tab: {0}")]
pub struct UnknownTab(pub String);

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub time: String,
    pub event: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Venue {
    pub name: String,
    pub street: String,
    pub city: String,
}

impl Default for Venue {
    fn default() -> Self {
        Self {
            name: "The Garden Estate".to_string(),
            street: "123 Vineyard Lane".to_string(),
            city: "Charlottesville, VA 22902".to_string(),
        }
    }
}

impl Venue {
    /// Single-line address, as used in the calendar file
    pub fn one_line(&self) -> String {
        format!("{}, {}, {}", self.name, self.street, self.city)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelBlock {
    pub name: String,
    pub book_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Travel {
    pub hotels: Vec<HotelBlock>,
    pub getting_there: String,
}

impl Default for Travel {
    fn default() -> Self {
        let hotel = |name: &str| HotelBlock {
            name: name.to_string(),
            book_by: "Sept 1, 2026".to_string(),
        };
        Self {
            hotels: vec![hotel("The Charlottesville Inn"), hotel("Downtown Suites")],
            getting_there: "Charlottesville-Albemarle Airport (CHO) is 15 minutes from downtown. \
                Rideshare and rental cars are readily available."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DressCode {
    pub attire: String,
    pub note: String,
}

impl Default for DressCode {
    fn default() -> Self {
        Self {
            attire: "Cocktail Attire".to_string(),
            note: "The ceremony will be outdoors on grass".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryLink {
    pub name: String,
    pub url: String,
    /// Accent color shown on hover
    pub color: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Registry {
    pub intro: String,
    pub links: Vec<RegistryLink>,
    pub note: String,
}

impl Default for Registry {
    fn default() -> Self {
        let link = |name: &str, url: &str, color: &str, icon: &str| RegistryLink {
            name: name.to_string(),
            url: url.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
        };
        Self {
            intro: "Your presence is the best gift, but if you'd like to contribute to our \
                future together, we've registered at these locations:"
                .to_string(),
            links: vec![
                link("Amazon", "https://amazon.com/wedding/your-registry", "#FF9900", "🛍️"),
                link("Target", "https://target.com/gift-registry", "#CC0000", "🎯"),
                link("Zola", "https://zola.com/registry", "#FF6B6B", "💝"),
                link("Honeymoon Fund", "#", "#4ECDC4", "✈️"),
            ],
            note: "The most important gift is your presence on our special day. If you'd still \
                like to give something, we'd be grateful for contributions toward our honeymoon \
                adventure or home together!"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rsvp {
    /// Externally hosted form guests are sent to
    pub form_url: String,
    pub respond_by: String,
}

impl Default for Rsvp {
    fn default() -> Self {
        Self {
            form_url: "https://forms.gle/9U5nv3R1hasEXZYJA".to_string(),
            respond_by: "September 1, 2026".to_string(),
        }
    }
}

/// Back-of-card stats shown for the groom's side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyStats {
    pub max_bench: String,
    pub forty_yard: String,
    pub handicap: String,
    pub football_team: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyMember {
    pub name: String,
    pub relation: String,
    pub role: String,
    pub relationship_status: String,
    pub current_city: String,
    pub college: String,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<PartyStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorority: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeddingParty {
    pub groomsmen: Vec<PartyMember>,
    pub bridesmaids: Vec<PartyMember>,
}

const BEST_MAN_BLURB: &str = "The guy who somehow convinced his brother to let him be Best Man. \
    Known for dad jokes and questionable dance moves.";

#[allow(clippy::too_many_arguments)]
fn groomsman(
    name: &str,
    relation: &str,
    role: &str,
    status: &str,
    city: &str,
    college: &str,
    stats: [&str; 4],
    comment: &str,
) -> PartyMember {
    let [max_bench, forty_yard, handicap, football_team] = stats;
    PartyMember {
        name: name.to_string(),
        relation: relation.to_string(),
        role: role.to_string(),
        relationship_status: status.to_string(),
        current_city: city.to_string(),
        college: college.to_string(),
        comment: comment.to_string(),
        stats: Some(PartyStats {
            max_bench: max_bench.to_string(),
            forty_yard: forty_yard.to_string(),
            handicap: handicap.to_string(),
            football_team: football_team.to_string(),
        }),
        sorority: None,
    }
}

impl Default for WeddingParty {
    fn default() -> Self {
        Self {
            groomsmen: vec![
                groomsman(
                    "Harry",
                    "Brother",
                    "Best Man",
                    "Taken",
                    "Williamsburg, NY",
                    "Northwestern University",
                    ["135 lbs", "4.95s", "20.0", "Cleveland Browns"],
                    BEST_MAN_BLURB,
                ),
                groomsman(
                    "Chuck",
                    "Brother",
                    "Groomsman",
                    "Taken",
                    "Chicago, IL",
                    "University of Wisconsin",
                    ["105 lbs", "5.2s", "20.0", "Chicago Bears"],
                    "Known for his inconsistency off the tee and homer betting style, make sure \
                     your eyes are peeled for when Chuck hits the dance floor.",
                ),
                groomsman(
                    "Jacko",
                    "Brother",
                    "Groomsman",
                    "Single",
                    "Washington DC",
                    "University of Virginia",
                    ["185 lbs", "5.8s", "20.0", "The Hokies"],
                    BEST_MAN_BLURB,
                ),
                groomsman(
                    "Cole D",
                    "Dog",
                    "Groomsman",
                    "Cuffed",
                    "Charleston, SC",
                    "University of South Carolina",
                    ["265 lbs", "4.8s", "9.5", "The Washington Football Team"],
                    BEST_MAN_BLURB,
                ),
                groomsman(
                    "Henry",
                    "Groomsman",
                    "Groomsman",
                    "Taken",
                    "Atlanta, GA",
                    "James Madison University",
                    ["225 lbs", "5.3s", "11.5", "The Washington Commanders"],
                    BEST_MAN_BLURB,
                ),
                groomsman(
                    "Oliver",
                    "Dog",
                    "Groomsman",
                    "Taken",
                    "New York, NY",
                    "Washington & Lee University",
                    ["255 lbs", "4.6s", "22.0", "Washington Redskins"],
                    BEST_MAN_BLURB,
                ),
                groomsman(
                    "Wyatt",
                    "Brother in law",
                    "Groomsman",
                    "Single",
                    "Knoxville, TN",
                    "University of Tennessee",
                    ["225 lbs", "4.8s", "16.0", "The Vols"],
                    BEST_MAN_BLURB,
                ),
            ],
            bridesmaids: vec![PartyMember {
                name: "Sarah Johnson".to_string(),
                relation: "Sister".to_string(),
                role: "Maid of Honor".to_string(),
                relationship_status: "Taken".to_string(),
                current_city: "Boston, MA".to_string(),
                college: "Boston College".to_string(),
                comment: "Can recite every line from The Office. Yes, all 9 seasons. It's both \
                    impressive and concerning."
                    .to_string(),
                stats: None,
                sorority: Some("Kappa Kappa Gamma".to_string()),
            }],
        }
    }
}

/// Everything the page shows besides the countdown and guest book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    pub couple: String,
    pub date_display: String,
    pub location_display: String,
    pub story: Vec<String>,
    pub schedule: Vec<ScheduleItem>,
    pub venue: Venue,
    pub travel: Travel,
    pub dress_code: DressCode,
    pub registry: Registry,
    pub rsvp: Rsvp,
    pub wedding_party: WeddingParty,
    pub footer: String,
}

impl Default for SiteContent {
    fn default() -> Self {
        let item = |time: &str, event: &str| ScheduleItem {
            time: time.to_string(),
            event: event.to_string(),
        };
        Self {
            couple: "Ben & Emily".to_string(),
            date_display: "October 24, 2026".to_string(),
            location_display: "Charlottesville, Virginia".to_string(),
            story: vec![
                "What started as a chance meeting turned into countless adventures, inside \
                 jokes, and a love that grows deeper every day. We've laughed through the chaos, \
                 supported each other through challenges, and built a life filled with joy."
                    .to_string(),
                "Now, we're ready to celebrate this next chapter with the people who mean the \
                 most to us. We can't wait to share this special day with you!"
                    .to_string(),
            ],
            schedule: vec![
                item("4:00 PM", "Ceremony"),
                item("5:00 PM", "Cocktail Hour"),
                item("6:00 PM", "Reception & Dinner"),
                item("10:00 PM", "Send-off"),
            ],
            venue: Venue::default(),
            travel: Travel::default(),
            dress_code: DressCode::default(),
            registry: Registry::default(),
            rsvp: Rsvp::default(),
            wedding_party: WeddingParty::default(),
            footer: "We can't wait to celebrate with you".to_string(),
        }
    }
}

impl SiteContent {
    /// Content rendered by one tab
    pub fn tab(&self, tab: Tab) -> serde_json::Value {
        let body = match tab {
            Tab::Main => json!({
                "couple": self.couple,
                "date": self.date_display,
                "location": self.location_display,
                "story": self.story,
            }),
            Tab::Rsvp => json!({ "rsvp": self.rsvp }),
            Tab::Info => json!({
                "schedule": self.schedule,
                "venue": self.venue,
                "travel": self.travel,
                "dress_code": self.dress_code,
            }),
            Tab::Party => json!({ "wedding_party": self.wedding_party }),
            Tab::Registry => json!({ "registry": self.registry }),
            Tab::GuestBook => json!({
                "intro": "Leave us a message and snap a selfie! 📸",
            }),
        };

        json!({
            "tab": tab.slug(),
            "label": tab.label(),
            "content": body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_slugs_round_trip() {
        for tab in Tab::ALL {
            assert_eq!(tab.slug().parse::<Tab>().unwrap(), tab);
        }
        assert_eq!("GuestBook".parse::<Tab>().unwrap(), Tab::GuestBook);
        assert_eq!(
            "honeymoon".parse::<Tab>().unwrap_err(),
            UnknownTab("honeymoon".to_string())
        );
    }

    #[test]
    fn test_default_copy() {
        let site = SiteContent::default();

        assert_eq!(site.schedule.len(), 4);
        assert_eq!(site.schedule[0].event, "Ceremony");
        assert_eq!(site.registry.links.len(), 4);
        assert_eq!(site.wedding_party.groomsmen[0].role, "Best Man");
        assert_eq!(
            site.venue.one_line(),
            "The Garden Estate, 123 Vineyard Lane, Charlottesville, VA 22902"
        );
    }

    #[test]
    fn test_tab_payloads() {
        let site = SiteContent::default();

        let info = site.tab(Tab::Info);
        assert_eq!(info["tab"], "info");
        assert_eq!(info["content"]["dress_code"]["attire"], "Cocktail Attire");

        let rsvp = site.tab(Tab::Rsvp);
        assert_eq!(
            rsvp["content"]["rsvp"]["form_url"],
            "https://forms.gle/9U5nv3R1hasEXZYJA"
        );

        let party = site.tab(Tab::Party);
        let bridesmaid = &party["content"]["wedding_party"]["bridesmaids"][0];
        assert_eq!(bridesmaid["sorority"], "Kappa Kappa Gamma");
        assert!(bridesmaid.get("stats").is_none());
    }

    #[test]
    fn test_partial_override_from_toml() {
        let site: SiteContent = toml::from_str(
            r#"
            couple = "Sam & Alex"

            [rsvp]
            form_url = "https://example.com/rsvp"
            "#,
        )
        .unwrap();

        assert_eq!(site.couple, "Sam & Alex");
        assert_eq!(site.rsvp.form_url, "https://example.com/rsvp");
        assert_eq!(site.rsvp.respond_by, "September 1, 2026");
        assert_eq!(site.schedule.len(), 4);
    }
}
