/// WGSL shader for the desk scene: per-draw model/color/material uniforms,
/// up to two texture layers plus a specular map, and Phong shading over the
/// four-slot light bank.
pub const SCENE_SHADER: &str = r#"
struct Light {
    position: vec4<f32>,
    ambient_color: vec4<f32>,
    diffuse_color: vec4<f32>,
    specular_color: vec4<f32>,
    // x: enabled, y: focal strength, z: specular intensity
    params: vec4<f32>,
};

struct FrameUniforms {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    view_position: vec4<f32>,
    lights: array<Light, 4>,
};

struct DrawUniforms {
    model: mat4x4<f32>,
    color: vec4<f32>,
    // rgb: ambient color, w: ambient strength
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    // rgb: specular color, w: shininess
    specular: vec4<f32>,
    uv_scale: vec4<f32>,
    // x: base texture, y: overlay texture, z: specular map, w: lighting
    flags: vec4<u32>,
};

@group(0) @binding(0)
var<uniform> frame: FrameUniforms;

@group(1) @binding(0)
var<uniform> draw: DrawUniforms;

@group(2) @binding(0) var tex_sampler: sampler;
@group(2) @binding(1) var base_texture: texture_2d<f32>;
@group(2) @binding(2) var overlay_texture: texture_2d<f32>;
@group(2) @binding(3) var specular_map: texture_2d<f32>;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = draw.model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (draw.model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = frame.projection * frame.view * world_pos;
    out.world_position = world_pos.xyz;
    out.world_normal = world_normal;
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let uv = in.uv * draw.uv_scale.xy;
    let base_sample = textureSample(base_texture, tex_sampler, uv);
    let overlay_sample = textureSample(overlay_texture, tex_sampler, uv);
    let spec_sample = textureSample(specular_map, tex_sampler, uv).r;

    var base = draw.color;
    if (draw.flags.x != 0u) {
        base = base_sample * draw.color;
    }
    if (draw.flags.y != 0u) {
        base = vec4<f32>(mix(base.rgb, overlay_sample.rgb, overlay_sample.a), base.a);
    }
    if (draw.flags.w == 0u) {
        return base;
    }

    var spec_mask = 1.0;
    if (draw.flags.z != 0u) {
        spec_mask = spec_sample;
    }

    let normal = normalize(in.world_normal);
    let view_dir = normalize(frame.view_position.xyz - in.world_position);

    var light_sum = vec3<f32>(0.0);
    var spec_sum = vec3<f32>(0.0);
    for (var i = 0u; i < 4u; i = i + 1u) {
        let light = frame.lights[i];
        if (light.params.x == 0.0) {
            continue;
        }
        light_sum += light.ambient_color.rgb * draw.ambient.rgb * draw.ambient.w;

        let light_dir = normalize(light.position.xyz - in.world_position);
        let diff = max(dot(normal, light_dir), 0.0);
        light_sum += diff * light.diffuse_color.rgb * draw.diffuse.rgb;

        let reflect_dir = reflect(-light_dir, normal);
        let spec_angle = max(dot(view_dir, reflect_dir), 0.0);
        let spec = light.params.z * pow(spec_angle, draw.specular.w * light.params.y);
        spec_sum += spec * light.specular_color.rgb * draw.specular.rgb * spec_mask;
    }

    return vec4<f32>(base.rgb * light_sum + spec_sum, base.a);
}
"#;
