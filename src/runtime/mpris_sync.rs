use crate::app::App;
use crate::mpris::MprisHandle;

pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    let now_playing = app
        .session
        .current
        .and_then(|i| app.library.get(i))
        .map(|t| (t.name.as_str(), &app.session.tags, app.session.duration));

    mpris.set_now_playing(now_playing);
    mpris.set_playback(app.session.state);
}
