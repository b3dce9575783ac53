//! Emoji the grammar recognizes, plus the TLD list the text rule stops at.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Literal emoji and their canonical shortcodes.
pub const EMOJI: &[(&str, &str)] = &[
    ("😀", ":grinning:"),
    ("😃", ":smiley:"),
    ("😄", ":smile:"),
    ("😁", ":grin:"),
    ("😆", ":laughing:"),
    ("😅", ":sweat_smile:"),
    ("😂", ":joy:"),
    ("🤣", ":rolling_on_the_floor_laughing:"),
    ("☺️", ":relaxed:"),
    ("😊", ":blush:"),
    ("😇", ":innocent:"),
    ("🙂", ":slightly_smiling_face:"),
    ("🙃", ":upside_down_face:"),
    ("😉", ":wink:"),
    ("😌", ":relieved:"),
    ("😍", ":heart_eyes:"),
    ("😘", ":kissing_heart:"),
    ("😋", ":yum:"),
    ("😛", ":stuck_out_tongue:"),
    ("😜", ":stuck_out_tongue_winking_eye:"),
    ("🤪", ":zany_face:"),
    ("🤓", ":nerd_face:"),
    ("😎", ":sunglasses:"),
    ("🤩", ":star-struck:"),
    ("🥳", ":partying_face:"),
    ("😏", ":smirk:"),
    ("😒", ":unamused:"),
    ("😞", ":disappointed:"),
    ("😔", ":pensive:"),
    ("😟", ":worried:"),
    ("😕", ":confused:"),
    ("🙁", ":slightly_frowning_face:"),
    ("😣", ":persevere:"),
    ("😖", ":confounded:"),
    ("😫", ":tired_face:"),
    ("😩", ":weary:"),
    ("🥺", ":pleading_face:"),
    ("😢", ":cry:"),
    ("😭", ":sob:"),
    ("😤", ":triumph:"),
    ("😠", ":angry:"),
    ("😡", ":rage:"),
    ("🤯", ":exploding_head:"),
    ("😳", ":flushed:"),
    ("😱", ":scream:"),
    ("😨", ":fearful:"),
    ("😰", ":cold_sweat:"),
    ("🤗", ":hugging_face:"),
    ("🤔", ":thinking_face:"),
    ("🤭", ":face_with_hand_over_mouth:"),
    ("🤫", ":shushing_face:"),
    ("😶", ":no_mouth:"),
    ("😐", ":neutral_face:"),
    ("😑", ":expressionless:"),
    ("😬", ":grimacing:"),
    ("🙄", ":face_with_rolling_eyes:"),
    ("😯", ":hushed:"),
    ("😮", ":open_mouth:"),
    ("😲", ":astonished:"),
    ("🥱", ":yawning_face:"),
    ("😴", ":sleeping:"),
    ("🤤", ":drooling_face:"),
    ("😵", ":dizzy_face:"),
    ("🤐", ":zipper_mouth_face:"),
    ("🤢", ":nauseated_face:"),
    ("🤮", ":face_vomiting:"),
    ("🤧", ":sneezing_face:"),
    ("😷", ":mask:"),
    ("🤒", ":face_with_thermometer:"),
    ("🤕", ":face_with_head_bandage:"),
    ("🤑", ":money_mouth_face:"),
    ("🤠", ":face_with_cowboy_hat:"),
    ("😈", ":smiling_imp:"),
    ("👻", ":ghost:"),
    ("💀", ":skull:"),
    ("👽", ":alien:"),
    ("🤖", ":robot_face:"),
    ("💩", ":hankey:"),
    ("😺", ":smiley_cat:"),
    ("🙈", ":see_no_evil:"),
    ("🙉", ":hear_no_evil:"),
    ("🙊", ":speak_no_evil:"),
    ("👋", ":wave:"),
    ("🤚", ":raised_back_of_hand:"),
    ("✋", ":hand:"),
    ("👌", ":ok_hand:"),
    ("✌️", ":v:"),
    ("🤞", ":crossed_fingers:"),
    ("🤟", ":i_love_you_hand_sign:"),
    ("🤘", ":the_horns:"),
    ("👈", ":point_left:"),
    ("👉", ":point_right:"),
    ("👆", ":point_up_2:"),
    ("👇", ":point_down:"),
    ("👍", ":+1:"),
    ("👎", ":-1:"),
    ("✊", ":fist:"),
    ("👊", ":facepunch:"),
    ("👏", ":clap:"),
    ("🙌", ":raised_hands:"),
    ("🙏", ":pray:"),
    ("💪", ":muscle:"),
    ("👀", ":eyes:"),
    ("🧠", ":brain:"),
    ("❤️", ":heart:"),
    ("🧡", ":orange_heart:"),
    ("💛", ":yellow_heart:"),
    ("💚", ":green_heart:"),
    ("💙", ":blue_heart:"),
    ("💜", ":purple_heart:"),
    ("🖤", ":black_heart:"),
    ("💔", ":broken_heart:"),
    ("💯", ":100:"),
    ("💥", ":boom:"),
    ("💫", ":dizzy:"),
    ("💤", ":zzz:"),
    ("🔥", ":fire:"),
    ("✨", ":sparkles:"),
    ("⭐", ":star:"),
    ("🌟", ":star2:"),
    ("⚡", ":zap:"),
    ("☀️", ":sunny:"),
    ("🌈", ":rainbow:"),
    ("☔", ":umbrella_with_rain_drops:"),
    ("❄️", ":snowflake:"),
    ("🌊", ":ocean:"),
    ("🐶", ":dog:"),
    ("🐱", ":cat:"),
    ("🦊", ":fox_face:"),
    ("🐻", ":bear:"),
    ("🐼", ":panda_face:"),
    ("🐸", ":frog:"),
    ("🐙", ":octopus:"),
    ("🦀", ":crab:"),
    ("🐢", ":turtle:"),
    ("🦄", ":unicorn_face:"),
    ("🐝", ":bee:"),
    ("🌵", ":cactus:"),
    ("🌻", ":sunflower:"),
    ("🍕", ":pizza:"),
    ("🍔", ":hamburger:"),
    ("🌮", ":taco:"),
    ("🍩", ":doughnut:"),
    ("🍪", ":cookie:"),
    ("🎂", ":birthday:"),
    ("🍺", ":beer:"),
    ("🍻", ":beers:"),
    ("☕", ":coffee:"),
    ("🍵", ":tea:"),
    ("🎉", ":tada:"),
    ("🎊", ":confetti_ball:"),
    ("🎈", ":balloon:"),
    ("🎁", ":gift:"),
    ("🏆", ":trophy:"),
    ("⚽", ":soccer:"),
    ("🏀", ":basketball:"),
    ("🎮", ":video_game:"),
    ("🎲", ":game_die:"),
    ("🎵", ":musical_note:"),
    ("🎸", ":guitar:"),
    ("🚀", ":rocket:"),
    ("✈️", ":airplane:"),
    ("🚗", ":car:"),
    ("🚲", ":bike:"),
    ("⌛", ":hourglass:"),
    ("⏰", ":alarm_clock:"),
    ("📱", ":iphone:"),
    ("💻", ":computer:"),
    ("⌨️", ":keyboard:"),
    ("💾", ":floppy_disk:"),
    ("📷", ":camera:"),
    ("💡", ":bulb:"),
    ("📚", ":books:"),
    ("✏️", ":pencil2:"),
    ("📌", ":pushpin:"),
    ("📎", ":paperclip:"),
    ("🔒", ":lock:"),
    ("🔑", ":key:"),
    ("🔨", ":hammer:"),
    ("🔧", ":wrench:"),
    ("⚙️", ":gear:"),
    ("💰", ":moneybag:"),
    ("💸", ":money_with_wings:"),
    ("✅", ":white_check_mark:"),
    ("❌", ":x:"),
    ("❓", ":question:"),
    ("❗", ":exclamation:"),
    ("⚠️", ":warning:"),
    ("🚫", ":no_entry_sign:"),
    ("🆗", ":ok:"),
    ("🆕", ":new:"),
    ("🔴", ":red_circle:"),
    ("🔵", ":large_blue_circle:"),
    ("🏁", ":checkered_flag:"),
    ("🚩", ":triangular_flag_on_post:"),
];

/// Common top-level domains; plain text stops before anything that looks
/// like a domain ending in one of these.
pub const COMMON_TLDS: &[&str] = &[
    "com", "org", "net", "int", "edu", "gov", "mil", "arpa", "io", "co", "ai", "app", "dev",
    "info", "biz", "name", "pro", "xyz", "site", "online", "tech", "store", "blog", "cloud",
    "me", "tv", "us", "uk", "ca", "au", "de", "fr", "es", "it", "nl", "be", "ch", "at", "se",
    "no", "dk", "fi", "pl", "cz", "ru", "ua", "cn", "jp", "kr", "in", "br", "mx", "ar", "za",
    "nz", "ie", "eu", "gg", "ly", "sh",
];

/// Suffix that picks a skin tone for the preceding shortcode.
const SKIN_TONE: &str = r"(?::skin-tone-[1-6]:)?";

/// Literal emoji to shortcode.
pub static EMOJI_INDEX_BY_CHAR: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| EMOJI.iter().copied().collect());

static EMOJI_INDEX_BY_SHORTCODE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| EMOJI.iter().map(|&(literal, code)| (code, literal)).collect());

/// Anchored matcher for one emoji: a known shortcode with optional skin
/// tone, or a known literal.
///
/// The regex crate takes the first alternative that matches, so longer
/// alternatives go first.
pub static EMOJI_REGEX: Lazy<Regex> = Lazy::new(|| {
    let mut shortcodes: Vec<&str> = EMOJI.iter().map(|&(_, code)| code).collect();
    shortcodes.sort_by_key(|code| std::cmp::Reverse(code.len()));
    let mut literals: Vec<&str> = EMOJI.iter().map(|&(literal, _)| literal).collect();
    literals.sort_by_key(|literal| std::cmp::Reverse(literal.len()));

    let shortcodes = shortcodes
        .iter()
        .map(|code| regex::escape(code))
        .collect::<Vec<_>>()
        .join("|");
    let literals = literals
        .iter()
        .map(|literal| regex::escape(literal))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("^(?:(?:{shortcodes}){SKIN_TONE}|{literals})"))
        .expect("emoji table builds a valid pattern")
});

/// The emoji at the start of `source`, if any.
pub fn match_emoji(source: &str) -> Option<&str> {
    EMOJI_REGEX.find(source).map(|m| m.as_str())
}

/// Canonical shortcode for a literal emoji.
pub fn shortcode_for(literal: &str) -> Option<&'static str> {
    EMOJI_INDEX_BY_CHAR.get(literal).copied()
}

/// Literal emoji for a shortcode; a skin-tone suffix is ignored.
pub fn literal_for(shortcode: &str) -> Option<&'static str> {
    let base = match shortcode.find("::skin-tone-") {
        Some(end) => &shortcode[..=end],
        None => shortcode,
    };
    EMOJI_INDEX_BY_SHORTCODE.get(base).copied()
}
