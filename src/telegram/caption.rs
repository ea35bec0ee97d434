//! Delivery caption formatting
//!
//! Builds the HTML caption attached to every delivered clip: title, curator
//! credit, a watch link, a subscribe link and two Telegram share links. The
//! curator credit is omitted entirely for unattributed clips.

use crate::types::Clip;

/// Telegram share-link endpoint
const SHARE_URL: &str = "https://t.me/share/url";

/// Build the HTML caption for one clip.
///
/// Output is deterministic for a given clip and configuration, which keeps
/// the enriched retry byte-identical to the first attempt.
pub fn build_caption(clip: &Clip, broadcaster_name: &str, channel_name: &str) -> String {
    let share_clip_url = format!("{SHARE_URL}?url={}", clip.url);
    // The share endpoint takes the text verbatim, so spaces are escaped by
    // hand rather than form-encoded.
    let share_channel_url = format!(
        "{SHARE_URL}?url=t.me/{channel_name}&text=Scopri altre fantastiche clip su @{channel_name}!"
    )
    .replace(' ', "%20");

    let mut caption = format!("⚡️ <b>{}</b>\n", clip.title);

    if let (Some(curator_name), Some(curator_url)) = (&clip.curator_name, &clip.curator_url) {
        caption.push_str(&format!(
            "\nGrazie a <a href='{curator_url}'>{curator_name}</a> per aver condiviso questa <b>clip!</b> 🔗\n"
        ));
    }

    caption.push_str(&format!(
        "\n<a href='{}'>📺 Guarda la clip su <b>Twitch</b></a>\n\
         👉 <b>Iscriviti</b> al canale <b><a href='https://twitch.tv/{broadcaster_name}'>Twitch</a></b> per vedere le clip in <b>diretta</b>!\n\
         \n\
         🔗 <b><a href='{share_clip_url}'>Condividi la clip su Telegram</a></b>\n\
         <b>⏩ <a href='{share_channel_url}'>Condividi il canale su Telegram</a></b>\n",
        clip.url
    ));

    caption
}
