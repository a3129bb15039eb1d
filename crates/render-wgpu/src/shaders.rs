/// WGSL shader for all scene primitives.
///
/// Per-instance model matrix, normal matrix and color. Ambient and diffuse
/// reflectance take the instance color; the `w` component of `sun_dir` and
/// `lamp_pos` is 1.0 when that light is switched on.
pub const SCENE_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    eye: vec4<f32>,
    ambient: vec4<f32>,
    sun_dir: vec4<f32>,
    sun_diffuse: vec4<f32>,
    sun_specular: vec4<f32>,
    lamp_pos: vec4<f32>,
    lamp_diffuse: vec4<f32>,
    lamp_specular: vec4<f32>,
    // rgb = specular reflectance, w = shininess
    material: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) normal_0: vec4<f32>,
    @location(7) normal_1: vec4<f32>,
    @location(8) normal_2: vec4<f32>,
    @location(9) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let normal_matrix = mat3x3<f32>(
        instance.normal_0.xyz,
        instance.normal_1.xyz,
        instance.normal_2.xyz,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = globals.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = normal_matrix * vertex.normal;
    out.color = instance.color;
    return out;
}

fn light_term(
    n: vec3<f32>,
    to_light: vec3<f32>,
    view: vec3<f32>,
    diffuse: vec3<f32>,
    specular: vec3<f32>,
    base: vec3<f32>,
) -> vec3<f32> {
    let n_dot_l = dot(n, to_light);
    if (n_dot_l <= 0.0) {
        return vec3<f32>(0.0);
    }
    let half_dir = normalize(to_light + view);
    let spec = pow(max(dot(n, half_dir), 0.0), globals.material.w);
    return diffuse * base * n_dot_l + specular * globals.material.xyz * spec;
}

@fragment
fn fs_main(in: VertexOutput, @builtin(front_facing) front: bool) -> @location(0) vec4<f32> {
    var n = normalize(in.world_normal);
    if (!front) {
        n = -n;
    }
    let base = in.color.rgb;
    let view = normalize(globals.eye.xyz - in.world_pos);

    var lit = globals.ambient.rgb * base;
    if (globals.sun_dir.w > 0.5) {
        lit += light_term(
            n,
            normalize(globals.sun_dir.xyz),
            view,
            globals.sun_diffuse.rgb,
            globals.sun_specular.rgb,
            base,
        );
    }
    if (globals.lamp_pos.w > 0.5) {
        lit += light_term(
            n,
            normalize(globals.lamp_pos.xyz - in.world_pos),
            view,
            globals.lamp_diffuse.rgb,
            globals.lamp_specular.rgb,
            base,
        );
    }
    return vec4<f32>(clamp(lit, vec3<f32>(0.0), vec3<f32>(1.0)), in.color.a);
}
"#;
