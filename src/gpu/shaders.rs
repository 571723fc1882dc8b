// ============================================================================
// GPU SHADERS — WGSL source kept inline for containment
// ============================================================================

// ============================================================================
// SV TEXTURE SHADER — fills the saturation/value map for one hue
// ============================================================================
//
// One invocation per texel: x is saturation, y is value, hue is a scalar
// uniform. The hsv_to_rgb sector math mirrors `color::hsv_to_rgb_f32` on the
// CPU side — keep the two in sync. Workgroups are 32×32; the guard at the
// top makes odd grid sizes produce exactly width×height writes.
pub const SV_TEXTURE_SHADER: &str = r#"
struct SvParams {
    width: u32,
    height: u32,
    hue: f32,
    _pad: u32,
};

@group(0) @binding(0) var sv_tex: texture_storage_2d<rgba8unorm, write>;
@group(0) @binding(1) var<uniform> params: SvParams;

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> vec3<f32> {
    let h6 = fract(h) * 6.0;
    let c = v * s;
    let x = c * (1.0 - abs((h6 % 2.0) - 1.0));
    let m = v - c;
    var rgb: vec3<f32>;
    let sector = i32(h6);
    if (sector == 0) {
        rgb = vec3<f32>(c, x, 0.0);
    } else if (sector == 1) {
        rgb = vec3<f32>(x, c, 0.0);
    } else if (sector == 2) {
        rgb = vec3<f32>(0.0, c, x);
    } else if (sector == 3) {
        rgb = vec3<f32>(0.0, x, c);
    } else if (sector == 4) {
        rgb = vec3<f32>(x, 0.0, c);
    } else {
        rgb = vec3<f32>(c, 0.0, x);
    }
    return rgb + vec3<f32>(m);
}

@compute @workgroup_size(32, 32, 1)
fn cs_sv_texture(@builtin(global_invocation_id) gid: vec3<u32>) {
    if (gid.x >= params.width || gid.y >= params.height) {
        return;
    }
    let s = f32(gid.x) / f32(params.width);
    let v = f32(gid.y) / f32(params.height);
    let rgb = hsv_to_rgb(params.hue, s, v);
    textureStore(sv_tex, vec2<i32>(i32(gid.x), i32(gid.y)), vec4<f32>(rgb, 1.0));
}
"#;
