use doxygen_harvest::config::{ScrapingConfig, SiteConfig};
use wiremock::MockServer;

/// Site configuration pointing at the mock server's `/docs/` directory
pub fn site_config(server: &MockServer) -> SiteConfig {
    SiteConfig {
        base_url: format!("{}/docs/", server.uri()),
        listing_page: "annotated.html".to_string(),
    }
}

/// Scraping configuration with no politeness delay and near-instant retries
pub fn fast_scraping() -> ScrapingConfig {
    ScrapingConfig {
        delay_ms: 0,
        timeout_secs: 5,
        max_retries: 2,
        retry_delay_ms: 1,
        user_agent: "HarvestTest/1.0".to_string(),
    }
}

pub const LISTING: &str = r#"<html><head><title>Class List</title></head><body>
<div class="directory"><table class="directory">
<tr id="row_0_"><td class="entry"><a class="el" href="namespace_sharp_kmy_audio.html">SharpKmyAudio</a></td><td class="desc"></td></tr>
<tr id="row_0_0_"><td class="entry"><a class="el" href="class_sharp_kmy_audio_1_1_sound.html">Sound</a></td><td class="desc">Plays a sound</td></tr>
<tr id="row_1_0_"><td class="entry"><a class="el" href="struct_yukar_1_1_common_1_1_vector3.html">Vector3</a></td><td class="desc">3D vector</td></tr>
</table></div></body></html>"#;

pub const SOUND_PAGE: &str = r##"<html><head><title>SharpKmyAudio.Sound Class Reference</title></head><body>
<div class="textblock"><p>Wraps a native sound.</p></div>
<table class="memberdecls">
<tr class="heading"><td colspan="2"><h2 class="groupheader"><a id="pub-methods" name="pub-methods"></a>Public Member Functions</h2></td></tr>
<tr class="memitem:a1"><td class="memItemLeft">bool</td><td class="memItemRight"><a class="el" href="#a1">play</a>(Vector3position, float*volume)</td></tr>
<tr class="memdesc:a1"><td class="mdescLeft"></td><td class="mdescRight">Starts playback. <a href="#a1">More...</a></td></tr>
</table>
<table class="memberdecls">
<tr class="heading"><td colspan="2"><h2 class="groupheader"><a id="pub-static-methods" name="pub-static-methods"></a>Static Public Member Functions</h2></td></tr>
<tr class="memitem:a2"><td class="memItemLeft">static <a class="el" href="class_sharp_kmy_audio_1_1_sound.html">Sound</a></td><td class="memItemRight"><a class="el" href="#a2">load</a> (string path)</td></tr>
</table>
<a id="a1"></a>
<div class="memitem"><div class="memproto">bool play()</div><div class="memdoc"><p>Starts playback on the given mode.</p></div></div>
</body></html>"##;

pub const VECTOR_PAGE: &str = r##"<html><head><title>Yukar.Common.Vector3 Struct Reference</title></head><body>
<table class="memberdecls">
<tr class="heading"><td colspan="2"><h2 class="groupheader"><a id="pub-attribs" name="pub-attribs"></a>Public Attributes</h2></td></tr>
<tr class="memitem:f1"><td class="memItemLeft">float</td><td class="memItemRight"><a class="el" href="#f1">x</a></td></tr>
</table></body></html>"##;
