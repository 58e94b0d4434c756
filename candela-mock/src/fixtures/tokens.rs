use candela_core::StaticTokenResolver;

/// Reference asset every fixture pool is quoted against.
pub const XUSD: &str = "0xb5999795be0ebb5bab23144aa5fd6a02d080299f";
/// Wrapped bitcoin; also a direct quote asset.
pub const RBTC: &str = "0x542fda317318ebf1d3deaf76e0b632741a7e677d";
/// Governance token.
pub const SOV: &str = "0xefc78fc7d48b64958315949279ba181c2114abbd";
/// Dollar on chain; only ever quoted against XUSD.
pub const DOC: &str = "0xe700691da7b9851f2f35f8b8182c69c53ccad9db";
/// Any query touching this address fails with a transport error.
pub const FAIL: &str = "0x00000000000000000000000000000000000fa11";

/// Resolver knowing every fixture asset.
pub fn resolver() -> StaticTokenResolver {
    [
        ("XUSD", XUSD),
        ("RBTC", RBTC),
        ("SOV", SOV),
        ("DOC", DOC),
        ("FAIL", FAIL),
    ]
    .into_iter()
    .collect()
}
