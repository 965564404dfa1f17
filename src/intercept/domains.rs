//! Built-in domain list.
//!
//! The default set of game-service domains redirected to the configured
//! remote host. `rewrite.domains` in the config file replaces this list
//! entirely when present.

/// Game-service domains rewritten by default.
pub const DEFAULT_DOMAINS: &[&str] = &[
    "api-os-takumi.mihoyo.com",
    "hk4e-api-os-static.mihoyo.com",
    "hk4e-sdk-os.mihoyo.com",
    "dispatchosglobal.yuanshen.com",
    "osusadispatch.yuanshen.com",
    "account.mihoyo.com",
    "log-upload-os.mihoyo.com",
    "dispatchcntest.yuanshen.com",
    "devlog-upload.mihoyo.com",
    "webstatic.mihoyo.com",
    "log-upload.mihoyo.com",
    "hk4e-sdk.mihoyo.com",
    "api-beta-sdk.mihoyo.com",
    "api-beta-sdk-os.mihoyo.com",
    "cnbeta01dispatch.yuanshen.com",
    "dispatchcnglobal.yuanshen.com",
    "cnbeta02dispatch.yuanshen.com",
    "sdk-os-static.mihoyo.com",
    "webstatic-sea.mihoyo.com",
    "webstatic-sea.hoyoverse.com",
    "hk4e-sdk-os-static.hoyoverse.com",
    "sdk-os-static.hoyoverse.com",
    "api-account-os.hoyoverse.com",
    "hk4e-sdk-os.hoyoverse.com",
    "overseauspider.yuanshen.com",
    "gameapi-account.mihoyo.com",
    "minor-api.mihoyo.com",
    "public-data-api.mihoyo.com",
    "uspider.yuanshen.com",
    "sdk-static.mihoyo.com",
];

/// The default domain list as owned strings, for config defaults.
pub fn default_domains() -> Vec<String> {
    DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect()
}
